use actix_web::http::StatusCode;
use waypoint::errors::{Result, WaypointError};

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_invalid_url_error() {
        let error = WaypointError::invalid_url("missing host");

        assert!(matches!(error, WaypointError::InvalidUrl(_)));
        assert!(error.to_string().contains("Invalid URL"));
        assert!(error.to_string().contains("missing host"));
    }

    #[test]
    fn test_conflict_error() {
        let error = WaypointError::conflict("code 'docs' is taken");

        assert!(matches!(error, WaypointError::Conflict(_)));
        assert_eq!(error.message(), "code 'docs' is taken");
        assert_eq!(error.code(), "E007");
    }

    #[test]
    fn test_format_simple_and_colored() {
        let error = WaypointError::gone("expired");
        assert_eq!(error.format_simple(), "Link Gone: expired");

        let colored = error.format_colored();
        assert!(colored.contains("E009"));
        assert!(colored.contains("expired"));
    }
}

#[cfg(test)]
mod status_mapping_tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_400() {
        for error in [
            WaypointError::invalid_url("x"),
            WaypointError::invalid_code("x"),
            WaypointError::invalid_ttl("x"),
            WaypointError::invalid_seconds("x"),
            WaypointError::invalid_action("x"),
            WaypointError::invalid_input("x"),
        ] {
            assert_eq!(error.http_status(), StatusCode::BAD_REQUEST, "{:?}", error);
            assert!(error.is_client_error());
        }
    }

    #[test]
    fn test_not_found_and_gone_stay_distinct() {
        assert_eq!(
            WaypointError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(WaypointError::gone("x").http_status(), StatusCode::GONE);
        assert_eq!(
            WaypointError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_server_side_errors_are_500() {
        for error in [
            WaypointError::allocation_exhausted("x"),
            WaypointError::store_operation("x"),
            WaypointError::serialization("x"),
            WaypointError::config("x"),
            WaypointError::file_operation("x"),
        ] {
            assert_eq!(
                error.http_status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{:?}",
                error
            );
            assert!(!error.is_client_error());
        }
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    fn parse(raw: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(raw)?)
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = parse("{oops").unwrap_err();
        assert!(matches!(err, WaypointError::Serialization(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: WaypointError = io.into();
        assert!(matches!(err, WaypointError::FileOperation(_)));
        assert!(err.message().contains("no such file"));
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(WaypointError::not_found("abc"));
        assert!(err.to_string().contains("abc"));
    }
}
