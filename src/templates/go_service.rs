//! AX-013: Go net/http microservice (`go.mod`, `main.go`).

use super::{comment_line, fill, string_literal};
use indexmap::IndexMap;

/// Default port baked into generated Go services.
pub const DEFAULT_PORT: u16 = 8080;

/// Go toolchain version written to `go.mod`.
pub const GO_VERSION: &str = "1.21";

/// Render `go.mod` and `main.go`, keyed by relative path.
pub fn render_service(name: &str, brief: &str) -> IndexMap<String, String> {
    let port = DEFAULT_PORT.to_string();
    let vars: [(&str, &str); 6] = [
        ("NAME", name),
        ("NAME_LIT", &string_literal(name)),
        ("BRIEF_COMMENT", &comment_line(brief)),
        ("BRIEF_LIT", &string_literal(brief)),
        ("PORT", &port),
        ("GO_VERSION", GO_VERSION),
    ];

    let mut files = IndexMap::new();
    files.insert("go.mod".to_string(), fill(GO_MOD, &vars));
    files.insert("main.go".to_string(), fill(MAIN_GO, &vars));
    files
}

const GO_MOD: &str = "module %%NAME%%\n\ngo %%GO_VERSION%%\n";

const MAIN_GO: &str = r#"// Command %%NAME%% is a small JSON HTTP service.
//
// %%BRIEF_COMMENT%%
//
// Run:
//
//	PORT=%%PORT%% go run .
package main

import (
	"encoding/json"
	"log"
	"net/http"
	"os"
	"time"
)

const (
	service = %%NAME_LIT%%
	brief   = %%BRIEF_LIT%%
)

var started = time.Now()

func writeJSON(w http.ResponseWriter, status int, v any) {
	w.Header().Set("Content-Type", "application/json")
	w.WriteHeader(status)
	if err := json.NewEncoder(w).Encode(v); err != nil {
		log.Printf("encode response: %v", err)
	}
}

func healthz(w http.ResponseWriter, r *http.Request) {
	writeJSON(w, http.StatusOK, map[string]any{
		"ok":      true,
		"service": service,
		"uptime":  time.Since(started).Round(time.Second).String(),
	})
}

func hello(w http.ResponseWriter, r *http.Request) {
	who := r.URL.Query().Get("name")
	if who == "" {
		who = "world"
	}
	writeJSON(w, http.StatusOK, map[string]any{
		"message": "hello, " + who,
		"service": service,
		"brief":   brief,
	})
}

func main() {
	port := os.Getenv("PORT")
	if port == "" {
		port = "%%PORT%%"
	}

	mux := http.NewServeMux()
	mux.HandleFunc("/healthz", healthz)
	mux.HandleFunc("/api/hello", hello)

	srv := &http.Server{
		Addr:              ":" + port,
		Handler:           mux,
		ReadHeaderTimeout: 5 * time.Second,
	}
	log.Printf("%s listening on :%s", service, port)
	if err := srv.ListenAndServe(); err != nil && err != http.ErrServerClosed {
		log.Fatal(err)
	}
}
"#;
