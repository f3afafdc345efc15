#![no_main]

use libfuzzer_sys::fuzz_target;
use osc_notify_core::{Outcome, Parser, ParserConfig, ScratchBuffer};

const CAPACITY: usize = 64;

fuzz_target!(|data: &[u8]| {
    let config = ParserConfig {
        buffer_capacity: CAPACITY,
        identifier_capacity: 16,
        sink_capacity: CAPACITY * 2,
    };
    let mut parser = Parser::new(&config).expect("fuzz config is valid");
    let mut sink = ScratchBuffer::new(config.sink_capacity);

    // Each 0xff byte separates one invocation from the next.
    for invocation in data.split(|&b| b == 0xff) {
        sink.clear();
        sink.extend_from_slice(invocation);
        let _ = sink.terminate();

        let was_valid = parser.is_valid();
        match parser.handle_sink(&sink) {
            Outcome::Emitted(n) => {
                assert!(was_valid);
                assert!(!n.title().is_empty());
                assert!(n.title().len() < CAPACITY);
                assert!(n.body().len() < CAPACITY);
            }
            Outcome::Pending | Outcome::Dropped(_) => assert!(was_valid),
            Outcome::Failed(_) => {}
        }

        let session = parser.session();
        assert!(session.title().len() < CAPACITY);
        assert!(session.body().len() < CAPACITY);
        if !session.is_active() {
            assert!(session.identifier().is_empty());
            assert!(session.title().is_empty() && session.body().is_empty());
        }

        if !parser.is_valid() {
            parser.reset();
        }
    }
});
