//! Property-based tests for the notification parser.
//!
//! Verifies parser invariants:
//! - Empty-metadata invocations emit the payload as title with an empty body
//! - Chunks sharing an identifier concatenate in order
//! - Base64 payloads decode to the same result as their raw form
//! - Ignored roles never change the session record
//! - Id-less chunks never carry bytes over from an earlier invocation
//! - Session lengths never exceed the configured capacity
//! - Once invalid, the parser stays invalid for any further input

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;

use osc_notify_core::{Outcome, Parser, ParserConfig};

// ────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────

/// Printable text without control characters.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ;:=,.!?\u{e9}\u{1f431}]{0,40}"
}

fn arb_nonempty_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ;:=,.!?\u{e9}\u{1f431}]{1,40}"
}

fn arb_identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_+.-]{1,16}"
}

fn arb_ignored_role() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("close"), Just("alive"), Just("icon"), Just("buttons")]
}

fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

fn emitted_pair(outcome: &Outcome<'_>) -> Option<(String, String)> {
    outcome
        .notification()
        .map(|n| (n.title().to_string(), n.body().to_string()))
}

proptest! {
    #[test]
    fn bare_payload_becomes_title(text in arb_nonempty_text()) {
        let mut parser = Parser::default();
        let invocation = format!(";{text}");
        let outcome = parser.handle_invocation(invocation.as_bytes());
        prop_assert_eq!(emitted_pair(&outcome), Some((text, String::new())));
    }

    #[test]
    fn chunks_concatenate(
        id in arb_identifier(),
        chunks in prop::collection::vec(arb_text(), 1..8),
        body in arb_nonempty_text(),
    ) {
        let mut parser = Parser::default();
        for chunk in &chunks {
            let invocation = format!("i={id}:d=0;{chunk}");
            prop_assert!(parser.handle_invocation(invocation.as_bytes()).is_pending());
        }
        let last = format!("i={id}:p=body;{body}");
        let outcome = parser.handle_invocation(last.as_bytes());
        let title: String = chunks.concat();
        let expected = if title.is_empty() {
            (body.clone(), String::new())
        } else {
            (title, body.clone())
        };
        prop_assert_eq!(emitted_pair(&outcome), Some(expected));
    }

    #[test]
    fn base64_matches_raw(text in arb_nonempty_text(), role in prop_oneof![Just("title"), Just("body")]) {
        let mut raw_parser = Parser::default();
        let mut b64_parser = Parser::default();
        let raw = format!("p={role};{text}");
        let encoded = format!("p={role}:e=1;{}", STANDARD.encode(text.as_bytes()));
        let a = emitted_pair(&raw_parser.handle_invocation(raw.as_bytes()));
        let b = emitted_pair(&b64_parser.handle_invocation(encoded.as_bytes()));
        prop_assert!(a.is_some());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn ignored_roles_are_inert(
        id in arb_identifier(),
        title in arb_nonempty_text(),
        role in arb_ignored_role(),
        ping_id in prop::option::of(arb_identifier()),
        done in any::<bool>(),
        payload in arb_bytes(),
    ) {
        let mut parser = Parser::default();
        let first = format!("i={id}:d=0;{title}");
        prop_assert!(parser.handle_invocation(first.as_bytes()).is_pending());

        let mut ping = format!("p={role}:d={}", u8::from(done)).into_bytes();
        if let Some(ping_id) = &ping_id {
            ping.extend_from_slice(format!(":i={ping_id}").as_bytes());
        }
        ping.push(b';');
        ping.extend_from_slice(&payload);
        prop_assert!(parser.handle_invocation(&ping).is_dropped());

        prop_assert!(parser.is_valid());
        prop_assert_eq!(parser.session().identifier(), id.as_bytes());
        prop_assert_eq!(parser.session().title(), title.as_bytes());
    }

    #[test]
    fn idless_never_carries_over(first in arb_nonempty_text(), second in arb_text()) {
        let mut parser = Parser::default();
        let a = format!("d=0;{first}");
        let b = format!("d=0;{second}");
        prop_assert!(parser.handle_invocation(a.as_bytes()).is_pending());
        prop_assert!(parser.handle_invocation(b.as_bytes()).is_pending());
        prop_assert_eq!(parser.session().title(), second.as_bytes());
    }

    #[test]
    fn lengths_stay_within_capacity(
        capacity in 2usize..64,
        chunks in prop::collection::vec("[a-z]{0,20}", 1..10),
    ) {
        let config = ParserConfig {
            buffer_capacity: capacity,
            identifier_capacity: capacity,
            ..ParserConfig::default()
        };
        let mut parser = Parser::new(&config).unwrap();
        for chunk in &chunks {
            let invocation = format!("i=cap:d=0;{chunk}");
            let _ = parser.handle_invocation(invocation.as_bytes());
            prop_assert!(parser.session().title().len() < capacity);
            if !parser.is_valid() {
                break;
            }
        }
        let total: usize = chunks.iter().map(String::len).sum();
        prop_assert_eq!(parser.is_valid(), total < capacity);
    }

    #[test]
    fn invalid_is_sticky(inputs in prop::collection::vec(arb_bytes(), 0..10)) {
        let mut parser = Parser::default();
        let _ = parser.handle_invocation(b"no separator here");
        prop_assert!(!parser.is_valid());
        for input in &inputs {
            let outcome = parser.handle_invocation(input);
            prop_assert!(outcome.error().is_some());
            prop_assert!(!parser.is_valid());
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(inputs in prop::collection::vec(arb_bytes(), 0..20)) {
        let mut parser = Parser::default();
        for input in &inputs {
            let _ = parser.handle_invocation(input);
            if !parser.is_valid() {
                parser.reset();
            }
        }
    }
}
