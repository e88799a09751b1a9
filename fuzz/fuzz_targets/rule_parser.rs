#![no_main]

use libfuzzer_sys::fuzz_target;
use rule_engine::services::rule::{build_tree, tokenize, RuleArena};

fuzz_target!(|data: &[u8]| {
    let rule = String::from_utf8_lossy(data);
    if let Ok(tokens) = tokenize(&rule) {
        let mut arena = RuleArena::new();
        if let Ok(root) = build_tree(&mut arena, &tokens) {
            let _ = arena.render(root);
        }
    }
});
