//! Unit tests for the source emitter state machine and text layout.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use super::*;
use rstest::rstest;

const TARGET: &str = "BuildConfig.java";

fn emitter() -> SourceEmitter<Vec<u8>> {
    SourceEmitter::new(Vec::new(), Utf8Path::new(TARGET))
}

fn finish_to_string(emitter: SourceEmitter<Vec<u8>>) -> String {
    let bytes = emitter.finish().expect("finish emitter");
    String::from_utf8(bytes).expect("emitted text is UTF-8")
}

/// Sink that stays readable after the emitter is dropped.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("emitted text is UTF-8")
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn writes_complete_unit() {
    let mut emitter = emitter();
    emitter
        .write_package("com.example")
        .and_then(|e| e.write_class("BuildConfig"))
        .and_then(|e| e.write_field(&FieldDefinition::string("VERSION", "1.2.0")))
        .and_then(|e| e.write_field(&FieldDefinition::new("int", "BUILD", "42")))
        .expect("write unit");

    let expected = concat!(
        "package com.example;\n",
        "\n",
        "/** DO NOT EDIT. GENERATED CODE */\n",
        "public final class BuildConfig\n",
        "{\n",
        "   private BuildConfig () { /* no instance */ }\n",
        "\n",
        "   public static final String VERSION = \"1.2.0\";\n",
        "\n",
        "   public static final int BUILD = 42;\n",
        "\n",
        "}\n",
    );
    assert_eq!(finish_to_string(emitter), expected);
}

#[rstest]
fn omits_package_line_when_absent() {
    let mut emitter = emitter();
    emitter
        .write_package_opt(None)
        .and_then(|e| e.write_class("Consts"))
        .expect("write class");

    let text = finish_to_string(emitter);
    assert!(text.starts_with("/** DO NOT EDIT. GENERATED CODE */\npublic final class Consts\n"));
    assert!(text.ends_with("/* no instance */ }\n\n}\n"));
}

#[rstest]
fn places_documentation_and_annotations_above_declaration() {
    let field = FieldDefinition::new("boolean", "DEBUG", "false")
        .with_documentation("/** Debug build flag. */")
        .with_annotations(["@Deprecated", "@SuppressWarnings(\"all\")"]);
    let mut emitter = emitter();
    emitter
        .write_class("BuildConfig")
        .and_then(|e| e.write_field(&field))
        .expect("write field");

    let text = finish_to_string(emitter);
    assert!(text.contains(concat!(
        "   /** Debug build flag. */\n",
        "   @Deprecated\n",
        "   @SuppressWarnings(\"all\")\n",
        "   public static final boolean DEBUG = false;\n",
        "\n",
    )));
}

#[rstest]
#[case::string("String", "hello", "   public static final String GREETING = \"hello\";\n")]
#[case::char("char", "x", "   public static final char GREETING = 'x';\n")]
#[case::int("int", "5", "   public static final int GREETING = 5;\n")]
fn formats_literal_by_type(#[case] field_type: &str, #[case] value: &str, #[case] line: &str) {
    let mut emitter = emitter();
    emitter
        .write_class("BuildConfig")
        .and_then(|e| e.write_field(&FieldDefinition::new(field_type, "GREETING", value)))
        .expect("write field");

    assert!(finish_to_string(emitter).contains(line));
}

#[rstest]
fn field_before_class_is_invalid_sequence() {
    let mut emitter = emitter();
    emitter.write_package("com.example").expect("write package");

    let err = emitter
        .write_field(&FieldDefinition::string("A", "a"))
        .err()
        .expect("field before class must fail");

    assert!(matches!(err, BuildConfigError::InvalidSequence(_)));
    assert_eq!(emitter.state(), EmitterState::HasPackage);
}

#[rstest]
fn second_class_is_invalid_sequence() {
    let mut emitter = emitter();
    emitter.write_class("BuildConfig").expect("first class");

    let err = emitter
        .write_class("BuildConfig")
        .err()
        .expect("second class must fail");

    assert!(matches!(err, BuildConfigError::InvalidSequence(_)));
}

#[rstest]
fn package_after_class_is_invalid_sequence() {
    let mut emitter = emitter();
    emitter.write_class("BuildConfig").expect("write class");

    let err = emitter
        .write_package("com.example")
        .err()
        .expect("package after class must fail");

    assert!(matches!(err, BuildConfigError::InvalidSequence(_)));
}

#[rstest]
fn close_without_class_writes_no_brace() {
    let mut emitter = emitter();
    emitter.write_package("com.example").expect("write package");

    assert_eq!(finish_to_string(emitter), "package com.example;\n\n");
}

#[rstest]
fn close_is_idempotent_and_rejects_later_writes() {
    let sink = SharedSink::default();
    let mut emitter = SourceEmitter::new(sink.clone(), Utf8Path::new(TARGET));
    emitter.write_class("BuildConfig").expect("write class");

    emitter.close().expect("first close");
    emitter.close().expect("second close");

    assert_eq!(emitter.state(), EmitterState::Closed);
    assert!(sink.text().ends_with("\n\n}\n"));
    assert_eq!(sink.text().matches('}').count(), 2);
    let err = emitter
        .write_field(&FieldDefinition::string("LATE", "x"))
        .err()
        .expect("write after close must fail");
    assert!(matches!(err, BuildConfigError::InvalidSequence(_)));
}

#[rstest]
fn drop_closes_open_class() {
    let sink = SharedSink::default();
    {
        let mut emitter = SourceEmitter::new(sink.clone(), Utf8Path::new(TARGET));
        emitter.write_class("BuildConfig").expect("write class");
    }

    assert!(sink.text().ends_with("/* no instance */ }\n\n}\n"));
}

#[rstest]
fn sink_failure_reports_target_path() {
    let mut emitter = SourceEmitter::new(FailingSink, Utf8Path::new(TARGET));

    let err = emitter
        .write_package("com.example")
        .err()
        .expect("failing sink must surface an error");

    match err {
        BuildConfigError::Io { path, .. } => assert_eq!(path, TARGET),
        other => panic!("expected I/O error, got {other:?}"),
    }
    assert_eq!(emitter.state(), EmitterState::Empty);
}
