#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use keel::domain::services::{compile_profiles, CompileSettings, ProducerRegistry};
use keel::infrastructure::repositories::parse_workspace;
use keel::infrastructure::LocalFs;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Any document that parses must also compile without panicking
        if let Ok(workspace) = parse_workspace(Path::new("keel.json"), content) {
            let settings = CompileSettings::new("/nonexistent");
            let _ = compile_profiles(
                &ProducerRegistry::default(),
                &LocalFs::new(),
                &settings,
                &workspace,
                &[],
            );
        }
    }
});
