//! End-to-end notification sequences through the sink-driven entry point.
//!
//! Each scenario feeds raw invocation bytes through a `ScratchBuffer`, the
//! way the escape-sequence tokenizer does, and checks the outcome stream.

use osc_notify_core::error::ErrorKind;
use osc_notify_core::{
    Command, DropReason, Error, Outcome, Parser, ParserConfig, ParserState, ScratchBuffer,
};

/// Owned summary of an outcome, so a whole sequence can be compared at once.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Seen {
    Pending,
    Ignored,
    Empty,
    Emitted(String, String),
    Failed(ErrorKind),
}

fn summarize(outcome: &Outcome<'_>) -> Seen {
    match outcome {
        Outcome::Pending => Seen::Pending,
        Outcome::Dropped(DropReason::IgnoredRole(_)) => Seen::Ignored,
        Outcome::Dropped(DropReason::EmptyNotification) => Seen::Empty,
        Outcome::Emitted(n) => Seen::Emitted(n.title().to_string(), n.body().to_string()),
        Outcome::Failed(err) => Seen::Failed(err.kind()),
    }
}

fn run_with(config: &ParserConfig, invocations: &[&[u8]]) -> (Parser, Vec<Seen>) {
    let mut parser = Parser::new(config).expect("test config is valid");
    let mut sink = ScratchBuffer::new(config.sink_capacity);
    let mut seen = Vec::new();
    for invocation in invocations {
        sink.clear();
        sink.extend_from_slice(invocation);
        let _ = sink.terminate();
        seen.push(summarize(&parser.handle_sink(&sink)));
    }
    (parser, seen)
}

fn run(invocations: &[&[u8]]) -> Vec<Seen> {
    run_with(&ParserConfig::default(), invocations).1
}

fn emitted(title: &str, body: &str) -> Seen {
    Seen::Emitted(title.to_string(), body.to_string())
}

// =============================================================================
// Basic shapes
// =============================================================================

#[test]
fn plain_title() {
    assert_eq!(run(&[b";Hello Kitty"]), vec![emitted("Hello Kitty", "")]);
}

#[test]
fn payload_may_contain_semicolons() {
    assert_eq!(run(&[b";a;b;c"]), vec![emitted("a;b;c", "")]);
}

#[test]
fn unicode_title_and_body() {
    assert_eq!(
        run(&[
            "i=u:d=0;Caf\u{e9} \u{1f431}".as_bytes(),
            "i=u:p=body;\u{65e5}\u{672c}".as_bytes(),
        ]),
        vec![Seen::Pending, emitted("Caf\u{e9} \u{1f431}", "\u{65e5}\u{672c}")]
    );
}

#[test]
fn multiline_body_is_safe() {
    assert_eq!(
        run(&[b"i=m:d=0;Title", b"i=m:p=body;line 1\nline 2\ttab"]),
        vec![Seen::Pending, emitted("Title", "line 1\nline 2\ttab")]
    );
}

// =============================================================================
// Chunking and identifiers
// =============================================================================

#[test]
fn chunked_title_then_body() {
    assert_eq!(
        run(&[b"i=abc:d=0:p=title;Kitty Title", b"i=abc:p=body;Kitty Body"]),
        vec![Seen::Pending, emitted("Kitty Title", "Kitty Body")]
    );
}

#[test]
fn mismatched_identifier_keeps_only_newest_session() {
    assert_eq!(
        run(&[b"i=A:d=0:p=title;Alpha", b"i=B:d=0:p=body;Bravo", b"i=B:p=body;!"]),
        vec![Seen::Pending, Seen::Pending, emitted("Bravo!", "")]
    );
}

#[test]
fn idless_invocations_never_accumulate() {
    assert_eq!(
        run(&[b"d=0;one", b"d=0;two", b";three"]),
        vec![Seen::Pending, Seen::Pending, emitted("three", "")]
    );
}

#[test]
fn session_resets_after_emit() {
    assert_eq!(
        run(&[b"i=s:d=0;Title", b"i=s:p=body;Body", b"i=s:p=body;Next"]),
        vec![
            Seen::Pending,
            emitted("Title", "Body"),
            // same id, but the session was closed by the emit
            emitted("Next", ""),
        ]
    );
}

#[test]
fn interleaved_base64_and_raw_chunks() {
    // "S2l0dHkg" = "Kitty ", "VGl0bGU=" = "Title"
    assert_eq!(
        run(&[b"i=b:d=0:e=1;S2l0dHkg", b"i=b:d=0:e=0;", b"i=b:e=1;VGl0bGU="]),
        vec![Seen::Pending, Seen::Pending, emitted("Kitty Title", "")]
    );
}

// =============================================================================
// Ignored roles
// =============================================================================

#[test]
fn pings_do_not_disturb_assembly() {
    assert_eq!(
        run(&[
            b"i=abc:d=0;Title",
            b"i=zzz:p=alive;",
            b"p=close:d=1;",
            b"i=abc:p=buttons;Yes,No",
            b"i=abc:p=body;Body",
        ]),
        vec![
            Seen::Pending,
            Seen::Ignored,
            Seen::Ignored,
            Seen::Ignored,
            emitted("Title", "Body"),
        ]
    );
}

#[test]
fn ping_with_new_identifier_is_inert() {
    let (parser, seen) = run_with(
        &ParserConfig::default(),
        &[b"i=keep:d=0;kept", b"i=fresh:p=close:d=1;"],
    );
    assert_eq!(seen, vec![Seen::Pending, Seen::Ignored]);
    assert_eq!(parser.session().identifier(), b"keep");
    assert_eq!(parser.session().title(), b"kept");
}

// =============================================================================
// Empty notifications and fallback
// =============================================================================

#[test]
fn id_only_completion_is_empty() {
    let (parser, seen) = run_with(&ParserConfig::default(), &[b"i=abc;"]);
    assert_eq!(seen, vec![Seen::Empty]);
    assert!(!parser.session().is_active());
    assert_eq!(parser.state(), ParserState::Valid);
}

#[test]
fn body_only_is_promoted_to_title() {
    assert_eq!(
        run(&[b"i=x:d=0:p=body;part one, ", b"i=x:p=body;part two"]),
        vec![Seen::Pending, emitted("part one, part two", "")]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn malformed_base64_poisons_until_reset() {
    let (mut parser, seen) = run_with(
        &ParserConfig::default(),
        &[b"e=1;@@@@", b";Hello", b"i=a;World"],
    );
    assert_eq!(
        seen,
        vec![
            Seen::Failed(ErrorKind::Encoding),
            Seen::Failed(ErrorKind::ParserInvalid),
            Seen::Failed(ErrorKind::ParserInvalid),
        ]
    );
    parser.reset();
    let outcome = parser.handle_invocation(b";Hello");
    assert_eq!(summarize(&outcome), emitted("Hello", ""));
}

#[test]
fn missing_separator_is_structural() {
    assert_eq!(
        run(&[b"p=title"]),
        vec![Seen::Failed(ErrorKind::Structural)]
    );
}

#[test]
fn empty_invocation_is_structural() {
    assert_eq!(run(&[b""]), vec![Seen::Failed(ErrorKind::Structural)]);
}

#[test]
fn full_sink_loses_sentinel() {
    let config = ParserConfig {
        sink_capacity: 8,
        ..ParserConfig::default()
    };
    let (parser, seen) = run_with(&config, &[b";1234567"]);
    assert_eq!(seen, vec![Seen::Failed(ErrorKind::Structural)]);
    assert_eq!(parser.state(), ParserState::Invalid);
}

#[test]
fn overflow_across_chunks() {
    let config = ParserConfig {
        buffer_capacity: 10,
        identifier_capacity: 4,
        ..ParserConfig::default()
    };
    let (parser, seen) = run_with(
        &config,
        &[b"i=o:d=0;12345", b"i=o:d=0;6789", b"i=o:d=0;0", b";fresh"],
    );
    assert_eq!(
        seen,
        vec![
            Seen::Pending,
            Seen::Pending,
            Seen::Failed(ErrorKind::Capacity),
            Seen::Failed(ErrorKind::ParserInvalid),
        ]
    );
    // bytes committed before the failing call are untouched
    assert_eq!(parser.session().title(), b"123456789");
}

#[test]
fn control_characters_are_rejected() {
    assert_eq!(
        run(&[b";ring\x07bell"]),
        vec![Seen::Failed(ErrorKind::Encoding)]
    );
}

#[test]
fn base64_hiding_escape_is_rejected() {
    // "G1szMW0=" decodes to ESC [ 3 1 m
    assert_eq!(
        run(&[b"e=1;G1szMW0="]),
        vec![Seen::Failed(ErrorKind::Encoding)]
    );
}

// =============================================================================
// Command slot
// =============================================================================

#[test]
fn last_command_tracks_latest_emit() {
    let (parser, _) = run_with(&ParserConfig::default(), &[b";one", b";two", b"d=0;three"]);
    assert_eq!(
        parser.last_command(),
        Some(&Command::ShowDesktopNotification {
            title: "two".to_string(),
            body: String::new(),
        })
    );
}

#[test]
fn failure_reports_typed_error() {
    let mut parser = Parser::default();
    assert_eq!(
        parser.handle_invocation(b"no-separator"),
        Outcome::Failed(Error::MissingSeparator)
    );
}
