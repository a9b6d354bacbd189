//! Property tests for the tool change processor

use probekit_gcode::{CommandProcessor, GcodeState, ToolChangeProcessor};
use proptest::prelude::*;

fn processor() -> ToolChangeProcessor {
    ToolChangeProcessor::new(0.0, 0.0, 10.0, "G53G0X0Y0", "G38.2Z-5F10")
}

fn expected_expansion() -> Vec<String> {
    processor().sequence().expand().to_vec()
}

proptest! {
    #[test]
    fn lines_without_tool_words_pass_through(
        line in "[GXYZFSgxyzfs0-9. -]{0,40}",
        comment in proptest::option::of("[ -~&&[^()]]{0,20}"),
    ) {
        let raw = match comment {
            Some(c) => format!("{line} ; {c}"),
            None => line,
        };
        let out = processor().process(&raw, &GcodeState::new()).unwrap();
        prop_assert_eq!(out, vec![raw]);
    }

    #[test]
    fn tool_change_lines_always_expand_the_same(
        prefix in "[GXYZgxyz0-9 ]{0,20}",
        tool in 0u32..100_000,
        code in 0u32..1_000,
        upper_t in any::<bool>(),
        upper_m in any::<bool>(),
        comment in proptest::option::of("[a-z ]{0,20}"),
    ) {
        let t = if upper_t { 'T' } else { 't' };
        let m = if upper_m { 'M' } else { 'm' };
        let mut raw = format!("{prefix}{t}{tool}{m}{code}");
        if let Some(c) = comment {
            raw.push_str(" ; ");
            raw.push_str(&c);
        }

        let out = processor().process(&raw, &GcodeState::new()).unwrap();
        prop_assert_eq!(out, expected_expansion());
    }

    #[test]
    fn trailing_words_after_directive_prevent_expansion(
        tool in 0u32..100,
        tail in "[GXYZ][0-9]{1,3}",
    ) {
        let raw = format!("T{tool}M6 {tail}");
        let out = processor().process(&raw, &GcodeState::new()).unwrap();
        prop_assert_eq!(out, vec![raw]);
    }
}
