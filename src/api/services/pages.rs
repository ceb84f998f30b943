//! HTML pages served to visitors
//!
//! Rendered with maud, so every dynamic value is escaped. Values embedded in
//! scripts go through [`script_string`].

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::services::countdown::{PENALTY_SECONDS, SKIP_THRESHOLD};

pub const FAVICON_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 24 24">
  <defs>
    <linearGradient id="g" x1="0" x2="1">
      <stop offset="0" stop-color="#0ea5e9"/>
      <stop offset="1" stop-color="#14b8a6"/>
    </linearGradient>
  </defs>
  <rect x="2" y="2" width="20" height="20" rx="5" fill="url(#g)"/>
  <path d="M7 12h8m-3-3.5L15.5 12 12 15.5" stroke="#fff" stroke-width="1.8" fill="none"
        stroke-linecap="round" stroke-linejoin="round"/>
</svg>"##;

const PAGE_CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,Helvetica,Arial,sans-serif;background:#f8fafc;color:#0f172a}
.card{max-width:640px;margin:14vh auto;background:#fff;border:1px solid #e2e8f0;border-radius:16px;padding:28px;text-align:center}
.card h1{margin:0 0 8px;font-size:1.5rem}
.card p{margin:0 0 12px;color:#334155}
.muted{color:#64748b;font-size:.9rem}
.target{word-break:break-all;font-family:ui-monospace,Menlo,monospace;font-size:.9rem}
.btn{display:inline-block;border:1px solid #0f172a;padding:8px 14px;border-radius:10px;color:#0f172a;text-decoration:none}
.penalty{display:none;color:#b91c1c;font-weight:600;margin:12px 0;padding:10px;background:#fee2e2;border:1px solid #fca5a5;border-radius:8px}
code{background:#f1f5f9;padding:1px 6px;border-radius:6px}
.panel{max-width:1100px;margin:32px auto;padding:0 16px}
.panel section{background:#fff;border:1px solid #e2e8f0;border-radius:16px;padding:20px;margin-bottom:20px}
.panel form{display:flex;flex-wrap:wrap;gap:10px;align-items:flex-end}
.panel label{display:flex;flex-direction:column;font-size:.85rem;color:#475569;gap:4px}
.panel input[type=text],.panel input[type=number]{border:1px solid #cbd5e1;border-radius:8px;padding:6px 10px}
.panel table{width:100%;border-collapse:collapse;font-size:.9rem}
.panel th,.panel td{border-bottom:1px solid #e2e8f0;padding:6px 8px;text-align:left;vertical-align:top}
.panel td.url{word-break:break-all;max-width:340px}
.panel button{border:1px solid #0f172a;background:#fff;border-radius:8px;padding:4px 10px;cursor:pointer}
.s-active{color:#15803d}.s-expiring{color:#b45309}.s-expired,.s-invalid{color:#b91c1c}
"#;

/// Admin client. Talks to `/api/links` only; every value is inserted with
/// `textContent`.
const ADMIN_SCRIPT: &str = r##"(function () {
  var API = "/api/links";
  var rows = document.getElementById("rows");
  var msg = document.getElementById("msg");
  var more = document.getElementById("more");
  var cursor = null;

  function say(text, bad) {
    msg.textContent = text;
    msg.style.color = bad ? "#b91c1c" : "#15803d";
  }
  function fmtTime(t) {
    return t ? new Date(t * 1000).toLocaleString() : "never";
  }
  function fmtLeft(s) {
    if (s === null || s === undefined) return "-";
    var h = Math.floor(s / 3600), m = Math.floor((s % 3600) / 60);
    return h ? h + "h " + m + "m" : m ? m + "m " + (s % 60) + "s" : s + "s";
  }
  async function call(method, url, body) {
    var res = await fetch(url, {
      method: method,
      headers: body ? { "content-type": "application/json" } : {},
      body: body ? JSON.stringify(body) : undefined
    });
    var json = await res.json();
    if (!res.ok || json.code !== 0) throw new Error(json.message || res.statusText);
    return json.data;
  }
  function cell(tr, text, cls) {
    var td = document.createElement("td");
    td.textContent = text;
    if (cls) td.className = cls;
    tr.appendChild(td);
    return td;
  }
  function button(td, label, handler) {
    var b = document.createElement("button");
    b.type = "button";
    b.textContent = label;
    b.addEventListener("click", handler);
    td.appendChild(b);
    td.appendChild(document.createTextNode(" "));
  }
  async function patch(code, body) {
    try {
      await call("PATCH", API + "/" + encodeURIComponent(code), body);
      var view = await call("GET", API + "/" + encodeURIComponent(code));
      var old = document.getElementById("row-" + code);
      if (old) old.replaceWith(row(view));
      say("Updated " + code);
    } catch (e) {
      say(code + ": " + e.message, true);
    }
  }
  function row(item) {
    var tr = document.createElement("tr");
    tr.id = "row-" + item.code;
    if (!item.url) {
      cell(tr, item.code);
      var td = cell(tr, "(unreadable)", "url");
      td.colSpan = 6;
      return tr;
    }
    cell(tr, item.code);
    cell(tr, item.url, "url");
    cell(tr, item.status, "s-" + item.status);
    cell(tr, fmtTime(item.expiresAt));
    cell(tr, fmtLeft(item.remaining));
    cell(tr, item.interstitial_enabled ? (item.interstitial_seconds || 0) + "s" : "off");
    var actions = cell(tr, "");
    if (item.status === "invalid") {
      button(actions, "Restore", function () { patch(item.code, { action: "restore" }); });
    } else {
      button(actions, "Invalidate", function () { patch(item.code, { action: "invalidate" }); });
    }
    button(actions, "TTL", function () {
      var raw = prompt("Lifetime in hours from now (empty = permanent)", "");
      if (raw === null) return;
      patch(item.code, { ttl_hours: raw.trim() === "" ? null : Number(raw) });
    });
    button(actions, "Countdown", function () {
      var raw = prompt("Countdown seconds (0 = off)", String(item.interstitial_seconds || 0));
      if (raw === null) return;
      var secs = Number(raw);
      patch(item.code, secs > 0
        ? { interstitial_enabled: true, interstitial_seconds: secs }
        : { interstitial_enabled: false });
    });
    return tr;
  }
  async function load(reset) {
    if (reset) { rows.textContent = ""; cursor = null; }
    var params = new URLSearchParams({ expand: "1" });
    if (cursor) params.set("cursor", cursor);
    try {
      var page = await call("GET", API + "?" + params.toString());
      page.items.forEach(function (item) { rows.appendChild(row(item)); });
      cursor = page.list_complete ? null : page.cursor;
      more.style.display = cursor ? "" : "none";
    } catch (e) {
      say("Load failed: " + e.message, true);
    }
  }

  document.getElementById("create").addEventListener("submit", async function (e) {
    e.preventDefault();
    var f = e.target;
    var body = { url: f.url.value.trim() };
    if (f.code.value.trim()) body.code = f.code.value.trim();
    if (f.ttl.value.trim()) body.ttl_hours = Number(f.ttl.value);
    if (f.seconds.value.trim() && Number(f.seconds.value) > 0) {
      body.interstitial_enabled = true;
      body.interstitial_seconds = Number(f.seconds.value);
    }
    try {
      var created = await call("POST", API, body);
      say("Created " + created.short);
      f.reset();
      load(true);
    } catch (err) {
      say("Create failed: " + err.message, true);
    }
  });
  document.getElementById("refresh").addEventListener("click", function () { load(true); });
  more.addEventListener("click", function () { load(false); });
  load(true);
})();"##;

/// JSON string literal that is also safe inside a `<script>` element.
fn script_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn shell(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="robots" content="noindex,nofollow";
                title { (title) }
                link rel="icon" href="/favicon.svg" type="image/svg+xml";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body { (body) }
        }
    }
}

/// Countdown page shown before sending the visitor on to `target`.
///
/// The script follows the same transitions as
/// [`Countdown`](crate::services::countdown::Countdown): it only counts while
/// the page is visible and answers an early skip with a penalty.
pub fn interstitial_page(target: &str, seconds: u64) -> Markup {
    let title = "Redirecting you shortly";
    let script = format!(
        r#"(function () {{
  var target = {target};
  var original = {seconds};
  var remaining = original;
  var PENALTY = {penalty};
  var THRESHOLD = {threshold};
  var state = "paused";
  var timer = null;
  var penaltyTimer = null;
  var secEl = document.getElementById("sec");
  var msgEl = document.getElementById("penalty-msg");

  function render() {{
    if (secEl) secEl.textContent = String(remaining);
    document.title = document.hidden ? "Come back to keep counting" : "(" + remaining + "s) " + {title};
  }}
  function stopTimer() {{
    if (timer) {{ clearInterval(timer); timer = null; }}
  }}
  function go() {{
    state = "elapsed";
    stopTimer();
    location.href = target;
  }}
  function tick() {{
    if (state !== "running") return;
    remaining = Math.max(0, remaining - 1);
    render();
    if (remaining === 0) go();
  }}
  function resume() {{
    if (state === "elapsed") return;
    if (remaining === 0) return go();
    state = "running";
    render();
    if (!timer) timer = setInterval(tick, 1000);
  }}
  function pause() {{
    if (state === "running") state = "paused";
    stopTimer();
    render();
  }}

  document.addEventListener("visibilitychange", function () {{
    if (document.hidden) pause(); else resume();
  }});

  var skip = document.getElementById("skip");
  if (skip) skip.addEventListener("click", function (e) {{
    e.preventDefault();
    if (state === "elapsed") return go();
    if (original > 0 && remaining / original > THRESHOLD) {{
      remaining += PENALTY;
      render();
      if (msgEl) {{
        msgEl.textContent = "Too impatient: " + PENALTY + " seconds added.";
        msgEl.style.display = "block";
        if (penaltyTimer) clearTimeout(penaltyTimer);
        penaltyTimer = setTimeout(function () {{ msgEl.style.display = "none"; penaltyTimer = null; }}, 8000);
      }}
    }} else {{
      go();
    }}
  }});

  if (document.hidden) render(); else resume();
}})();"#,
        target = script_string(target),
        seconds = seconds,
        penalty = PENALTY_SECONDS,
        threshold = SKIP_THRESHOLD,
        title = script_string(title),
    );

    shell(
        title,
        html! {
            div class="card" {
                h1 { (title) }
                p { "You are about to leave for:" }
                p class="target" { (target) }
                div id="penalty-msg" class="penalty" {}
                p { "Continuing in " b id="sec" { (seconds) } " seconds…" }
                p { a id="skip" class="btn" href=(target) rel="noreferrer" { "Go now" } }
                noscript { p class="muted" { "JavaScript is off; use the link above." } }
            }
            script { (PreEscaped(script)) }
        },
    )
}

/// Error page for a code that is absent (`gone = false`) or no longer usable.
pub fn invalid_page(host: &str, code: &str, gone: bool) -> Markup {
    let (title, detail) = if gone {
        (
            "This link is no longer available",
            "It has expired or was disabled by its owner.",
        )
    } else {
        ("This link does not exist", "Check the address for typos.")
    };

    shell(
        title,
        html! {
            div class="card" {
                h1 { (title) }
                p { code { (host) "/" (code) } }
                p class="muted" { (detail) }
            }
        },
    )
}

/// Landing page for `/`.
pub fn landing_page(author: &str, contact: &str) -> Markup {
    shell(
        "waypoint",
        html! {
            div class="card" {
                h1 { "waypoint" }
                p { "A small link shortener." }
                @if !author.is_empty() {
                    p class="muted" { "Run by " (author) }
                }
                @if !contact.is_empty() {
                    p class="muted" { "Contact: " (contact) }
                }
            }
        },
    )
}

/// Management page for `/admin`: create links, page through them and flip
/// their lifecycle, TTL and countdown.
pub fn admin_page() -> Markup {
    shell(
        "waypoint admin",
        html! {
            div class="panel" {
                h1 { "waypoint admin" }
                section {
                    h2 { "New link" }
                    form id="create" {
                        label { "Target URL" input type="text" name="url" placeholder="https://example.com" required; }
                        label { "Custom code" input type="text" name="code" placeholder="optional"; }
                        label { "TTL (hours)" input type="number" name="ttl" min="0" step="any" placeholder="permanent"; }
                        label { "Countdown (s)" input type="number" name="seconds" min="0" placeholder="off"; }
                        button type="submit" { "Create" }
                    }
                    p id="msg" class="muted" {}
                }
                section {
                    h2 { "Links " button id="refresh" type="button" { "Refresh" } }
                    table {
                        thead {
                            tr {
                                th { "Code" } th { "Target" } th { "Status" } th { "Expires" }
                                th { "Left" } th { "Countdown" } th { "Actions" }
                            }
                        }
                        tbody id="rows" {}
                    }
                    p { button id="more" type="button" style="display:none" { "Load more" } }
                }
                noscript { p class="muted" { "The admin page needs JavaScript." } }
            }
            script { (PreEscaped(ADMIN_SCRIPT)) }
        },
    )
}

/// Fallback for paths that match no route.
pub fn not_found_page(home: &str) -> Markup {
    shell(
        "Not found",
        html! {
            div class="card" {
                h1 { "Nothing here" }
                p class="muted" { "This page does not exist." }
                p { a class="btn" href=(home) { "Home" } }
            }
        },
    )
}
