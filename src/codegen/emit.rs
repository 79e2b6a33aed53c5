//! Go text emitter for the wrapper IR.

use std::fmt;

use super::ir::{Argument, GeneratedFile, Wrapper};

/// Renders the preamble followed by every wrapper.
pub fn emit(file: &GeneratedFile) -> String {
    file.to_string()
}

/// Renders one wrapper method.
pub fn emit_wrapper(wrapper: &Wrapper) -> String {
    wrapper.to_string()
}

impl fmt::Display for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package {}", self.package)?;
        writeln!(f)?;
        writeln!(f, "import (")?;
        for import in &self.imports {
            writeln!(f, "\t{}", quote(import))?;
        }
        writeln!(f, ")")?;
        for wrapper in &self.wrappers {
            writeln!(f)?;
            write!(f, "{}", wrapper)?;
        }
        Ok(())
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "func ({} {}) {}(res http.ResponseWriter, req *http.Request) {{",
            self.receiver_name, self.receiver_type, self.name
        )?;
        writeln!(
            f,
            "\tres.Header().Set(\"Content-Type\", {})",
            quote(&self.content_type)
        )?;
        if self.decode_body {
            writeln!(f, "\traw, err := io.ReadAll(req.Body)")?;
            writeln!(f, "\tif err != nil {{")?;
            writeln!(f, "\t\tpanic(err)")?;
            writeln!(f, "\t}}")?;
            writeln!(f, "\tvar parsed map[string]interface{{}}")?;
            writeln!(f, "\tif err := json.Unmarshal(raw, &parsed); err != nil {{")?;
            writeln!(f, "\t\tpanic(err)")?;
            writeln!(f, "\t}}")?;
        }
        let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
        writeln!(
            f,
            "\t{}, retcode := {}.{}({})",
            if self.write_body { "body" } else { "_" },
            self.receiver_name,
            self.target,
            args.join(", ")
        )?;
        writeln!(f, "\tres.WriteHeader(retcode)")?;
        if self.write_body {
            writeln!(f, "\tio.WriteString(res, string(body))")?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Request => write!(f, "req"),
            Argument::Response => write!(f, "res"),
            Argument::Field {
                key,
                assert_type,
                variadic,
            } => {
                write!(f, "parsed[{}]", quote(key))?;
                if let Some(ty) = assert_type {
                    write!(f, ".({})", ty)?;
                }
                if *variadic {
                    write!(f, "...")?;
                }
                Ok(())
            }
        }
    }
}

/// A Go interpreted string literal.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
