//! Common Go source fixtures for tests.

// Annotated result types
pub const MSG_TYPES: &str = r#"package main

//mimetype text/plain
type Msg string

type Page struct {
	Title string
}
"#;

// One handler per shape
pub const GREET_HANDLER: &str = r#"package main

type H struct{}

func (h *H) Greet(name string) (Msg, int) {
	return Msg("hello " + name), 200
}
"#;

pub const REQUEST_ONLY_HANDLER: &str = r#"package main

import "net/http"

type H struct{}

func (h *H) Ping(req *http.Request) (Msg, int) {
	return "pong", 200
}
"#;

pub const STREAM_HANDLER: &str = r#"package main

import "net/http"

type H struct{}

func (h *H) Stream(w http.ResponseWriter, r *http.Request, topic string) (Msg, int) {
	return "", 200
}
"#;

pub const FREE_FUNCTION: &str = r#"package main

func Greet(name string) (Msg, int) {
	return Msg(name), 200
}
"#;

/// Methods that must never be wrapped.
pub const NOT_HANDLERS: &str = r#"package main

type H struct{}

func (h *H) One() Msg { return "" }

func (h *H) Three() (Msg, int, error) { return "", 0, nil }

func (h *H) StatusString() (Msg, string) { return "", "" }

func (h *H) StatusInt64() (Msg, int64) { return "", 0 }

func (h *H) Plain() (Page, int) { return Page{}, 0 }

func (h *H) Nothing() {}
"#;

/// A package mixing every parameter kind.
pub const MIXED_PACKAGE: &str = r#"package api

import (
	"net/http"
)

//mimetype application/json
type Report []byte

// Store keeps reports.
type Store struct {
	reports map[string]Report
}

func (s Store) Get(id string, limit int, req *http.Request) (Report, int) {
	return s.reports[id], 200
}

func (s *Store) Put(id string, meta interface{}, tags ...string) (Report, int) {
	return nil, 201
}

func (s *Store) Dump(w http.ResponseWriter) (Report, int) {
	return nil, 200
}

func helper() int { return 0 }
"#;

pub const SYNTAX_ERROR: &str = r#"package main

func (h *H) Broken( (Msg, int) {
}
"#;
