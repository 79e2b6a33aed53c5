//! Emitted wrapper tests.

use handlergen::codegen::{Argument, emit_wrapper};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::package_helpers::*;
use crate::helpers::source_fixtures::*;

const GREET_WRAPPER: &str = "\
func (h *H) HandleGreet(res http.ResponseWriter, req *http.Request) {
\tres.Header().Set(\"Content-Type\", \"text/plain\")
\traw, err := io.ReadAll(req.Body)
\tif err != nil {
\t\tpanic(err)
\t}
\tvar parsed map[string]interface{}
\tif err := json.Unmarshal(raw, &parsed); err != nil {
\t\tpanic(err)
\t}
\tbody, retcode := h.Greet(parsed[\"name\"].(string))
\tres.WriteHeader(retcode)
\tio.WriteString(res, string(body))
}
";

#[test]
fn test_greet_file() {
    let text = emit_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", GREET_HANDLER)]);
    let expected = format!(
        "package main\n\nimport (\n\t\"io\"\n\t\"net/http\"\n\t\"encoding/json\"\n)\n\n{}",
        GREET_WRAPPER
    );
    assert_eq!(text, expected);
}

#[test]
fn test_request_only_wrapper() {
    let file = generate_from_sources(
        "main",
        &[("types.go", MSG_TYPES), ("h.go", REQUEST_ONLY_HANDLER)],
    )
    .unwrap();
    assert_eq!(file.wrappers.len(), 1);

    let expected = "\
func (h *H) HandlePing(res http.ResponseWriter, req *http.Request) {
\tres.Header().Set(\"Content-Type\", \"text/plain\")
\tbody, retcode := h.Ping(req)
\tres.WriteHeader(retcode)
\tio.WriteString(res, string(body))
}
";
    assert_eq!(emit_wrapper(&file.wrappers[0]), expected);
}

#[test]
fn test_mixed_package_wrappers() {
    let text = emit_from_sources("api", &[("api.go", MIXED_PACKAGE)]);
    let expected = "\
package api

import (
\t\"io\"
\t\"net/http\"
\t\"encoding/json\"
)

func (s Store) HandleGet(res http.ResponseWriter, req *http.Request) {
\tres.Header().Set(\"Content-Type\", \"application/json\")
\traw, err := io.ReadAll(req.Body)
\tif err != nil {
\t\tpanic(err)
\t}
\tvar parsed map[string]interface{}
\tif err := json.Unmarshal(raw, &parsed); err != nil {
\t\tpanic(err)
\t}
\tbody, retcode := s.Get(parsed[\"id\"].(string), parsed[\"limit\"].(int), req)
\tres.WriteHeader(retcode)
\tio.WriteString(res, string(body))
}

func (s *Store) HandlePut(res http.ResponseWriter, req *http.Request) {
\tres.Header().Set(\"Content-Type\", \"application/json\")
\traw, err := io.ReadAll(req.Body)
\tif err != nil {
\t\tpanic(err)
\t}
\tvar parsed map[string]interface{}
\tif err := json.Unmarshal(raw, &parsed); err != nil {
\t\tpanic(err)
\t}
\tbody, retcode := s.Put(parsed[\"id\"].(string), parsed[\"meta\"], parsed[\"tags\"].([]string)...)
\tres.WriteHeader(retcode)
\tio.WriteString(res, string(body))
}

func (s *Store) HandleDump(res http.ResponseWriter, req *http.Request) {
\tres.Header().Set(\"Content-Type\", \"application/json\")
\t_, retcode := s.Dump(res)
\tres.WriteHeader(retcode)
}
";
    assert_eq!(text, expected);
}

#[test]
fn test_no_wrappers_for_non_handlers() {
    let file =
        generate_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", NOT_HANDLERS)]).unwrap();
    assert!(file.wrappers.is_empty());
}

#[rstest]
#[case(GREET_HANDLER, 1, true)]
#[case(REQUEST_ONLY_HANDLER, 0, true)]
#[case(STREAM_HANDLER, 1, false)]
fn test_decode_and_body_write(
    #[case] handler: &str,
    #[case] decodes: usize,
    #[case] writes_body: bool,
) {
    let text = emit_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", handler)]);
    assert_eq!(text.matches("json.Unmarshal").count(), decodes);
    assert_eq!(text.matches("io.ReadAll").count(), decodes);
    assert_eq!(text.contains("io.WriteString"), writes_body);
    assert_eq!(text.contains("\tbody, retcode"), writes_body);
}

#[test]
fn test_arguments_keep_declaration_order() {
    let file =
        generate_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", STREAM_HANDLER)]).unwrap();
    let wrapper = &file.wrappers[0];
    assert_eq!(
        wrapper.args,
        vec![
            Argument::Response,
            Argument::Request,
            Argument::Field {
                key: "topic".into(),
                assert_type: Some("string".to_string()),
                variadic: false,
            },
        ]
    );
    assert_eq!(wrapper.fields().count(), 1);
}

#[rstest]
#[case("func (res *H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (_ *H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (*H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (retcode *H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (http *H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (json H) Get() (Msg, int) { return \"\", 0 }\n", "self")]
#[case("func (handler *H) Get() (Msg, int) { return \"\", 0 }\n", "handler")]
#[case("func (request *H) Get() (Msg, int) { return \"\", 0 }\n", "request")]
fn test_receiver_name(#[case] method: &str, #[case] expected: &str) {
    let source = format!("package main\n\ntype H struct{{}}\n\n{}", method);
    let file =
        generate_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", &source)]).unwrap();
    assert_eq!(file.wrappers[0].receiver_name, expected);
}

#[test]
fn test_unnamed_map_parameter_is_fatal() {
    let source = "package main\n\ntype H struct{}\n\nfunc (h *H) Get(string) (Msg, int) { return \"\", 0 }\n";
    let err =
        generate_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", source)]).unwrap_err();
    assert!(err.to_string().contains("has no name"), "{}", err);
}

#[test]
fn test_block_comments_do_not_block_generation() {
    let types = "/* Copyright */\npackage main\n\ntype Msg string /* body */ //mimetype text/plain\n";
    let handler = "package main\n\ntype H struct{}\n\nfunc (h *H) Greet(name /* who */ string) (Msg, int) {\n\treturn \"\", 200\n}\n";
    let text = emit_from_sources("main", &[("types.go", types), ("h.go", handler)]);
    assert!(text.ends_with(GREET_WRAPPER), "{}", text);
}
