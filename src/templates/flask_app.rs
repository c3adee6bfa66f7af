//! AX-010: Flask web app (`app.py`).
//!
//! Timer prompts get the "Futuristic UI Timer" page; everything else gets a
//! landing page plus a JSON info endpoint. Both honor `PORT` (default 8000)
//! and expose `/healthz`.

use super::{docstring, fill, html, string_literal};
use crate::core::slug::title_case;
use std::collections::BTreeMap;

/// Default port baked into generated Flask apps.
pub const DEFAULT_PORT: u16 = 8000;

/// Output file name.
pub const FILE_NAME: &str = "app.py";

/// Title of the timer page.
pub const TIMER_TITLE: &str = "Futuristic UI Timer";

/// Render `app.py`.
pub fn render_app(name: &str, brief: &str, fields: &BTreeMap<String, String>) -> String {
    let is_timer = fields.get("feature").map(String::as_str) == Some("timer");
    let (title, page) = if is_timer {
        (TIMER_TITLE.to_string(), TIMER_PAGE)
    } else {
        (title_case(name), LANDING_PAGE)
    };

    let page = fill(
        page,
        &[("TITLE", &html(&title)), ("BRIEF_HTML", &html(brief))],
    );
    fill(
        APP_TEMPLATE,
        &[
            ("DOC", &docstring(brief)),
            ("TITLE_DOC", &docstring(&title)),
            ("NAME_LIT", &string_literal(name)),
            ("BRIEF_LIT", &string_literal(brief)),
            ("PAGE", &page),
            ("PORT", &DEFAULT_PORT.to_string()),
        ],
    )
}

const APP_TEMPLATE: &str = r#"#!/usr/bin/env python3
"""%%DOC%%

%%TITLE_DOC%% served by Flask.

Run:
    pip install flask
    PORT=%%PORT%% python app.py
"""

import os

from flask import Flask, Response, jsonify

app = Flask(__name__)

SERVICE = %%NAME_LIT%%
BRIEF = %%BRIEF_LIT%%

PAGE = """%%PAGE%%"""


@app.get("/")
def index() -> Response:
    return Response(PAGE, mimetype="text/html")


@app.get("/api/info")
def info():
    return jsonify(service=SERVICE, brief=BRIEF)


@app.get("/healthz")
def healthz():
    return jsonify(ok=True, service=SERVICE)


if __name__ == "__main__":
    port = int(os.environ.get("PORT", "%%PORT%%"))
    app.run(host="0.0.0.0", port=port)
"#;

const TIMER_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>%%TITLE%%</title>
  <style>
    body {
      margin: 0;
      height: 100vh;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      background: radial-gradient(circle at center, #0b1030 0%, #02030a 70%);
      color: #7df9ff;
      font-family: "Orbitron", "Segoe UI", monospace;
    }
    h1 { letter-spacing: 0.3em; text-transform: uppercase; font-weight: 300; }
    .display {
      font-size: 7rem;
      letter-spacing: 0.15em;
      text-shadow: 0 0 12px #7df9ff, 0 0 36px #1e90ff;
    }
    .controls { margin-top: 2rem; }
    button, input {
      background: transparent;
      color: inherit;
      border: 1px solid #7df9ff;
      border-radius: 4px;
      padding: 0.6em 1.4em;
      margin: 0 0.3em;
      font: inherit;
    }
    button:hover { background: rgba(125, 249, 255, 0.15); cursor: pointer; }
    input { width: 5em; text-align: center; }
    .brief { opacity: 0.6; margin-top: 2rem; font-size: 0.9rem; }
  </style>
</head>
<body>
  <h1>%%TITLE%%</h1>
  <div class="display" id="display">00:00</div>
  <div class="controls">
    <input id="seconds" type="number" min="1" value="60" aria-label="seconds">
    <button onclick="startTimer()">Start</button>
    <button onclick="pauseTimer()">Pause</button>
    <button onclick="resetTimer()">Reset</button>
  </div>
  <p class="brief">%%BRIEF_HTML%%</p>
  <script>
    let remaining = 0;
    let handle = null;
    const display = document.getElementById("display");

    function draw() {
      const m = String(Math.floor(remaining / 60)).padStart(2, "0");
      const s = String(remaining % 60).padStart(2, "0");
      display.textContent = m + ":" + s;
    }

    function tick() {
      if (remaining > 0) {
        remaining -= 1;
        draw();
      }
      if (remaining === 0) {
        pauseTimer();
        display.classList.add("done");
      }
    }

    function startTimer() {
      if (handle !== null) return;
      if (remaining === 0) {
        remaining = parseInt(document.getElementById("seconds").value, 10) || 60;
      }
      display.classList.remove("done");
      draw();
      handle = setInterval(tick, 1000);
    }

    function pauseTimer() {
      clearInterval(handle);
      handle = null;
    }

    function resetTimer() {
      pauseTimer();
      remaining = 0;
      draw();
    }

    draw();
  </script>
</body>
</html>
"##;

const LANDING_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>%%TITLE%%</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 4rem auto; padding: 0 1rem; }
    code { background: #f3f3f3; padding: 0.1em 0.3em; border-radius: 3px; }
  </style>
</head>
<body>
  <h1>%%TITLE%%</h1>
  <p>%%BRIEF_HTML%%</p>
  <ul>
    <li><a href="/api/info"><code>GET /api/info</code></a></li>
    <li><a href="/healthz"><code>GET /healthz</code></a></li>
  </ul>
</body>
</html>
"##;
