#![no_main]

use defconst::backend::ContainerName;
use defconst::declaration::{RawDeclaration, parse_declarations};
use defconst::{SourceEmitter, collect};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Treat the input both as a JSON declaration file and as newline-separated `-D` arguments
    let mut decls = parse_declarations(s).unwrap_or_default();
    decls.extend(s.lines().map(RawDeclaration::from_cli_arg));

    let collected = collect(&decls);
    if collected.is_ready() {
        let container = ContainerName::parse("Fuzz", "Consts").expect("static container name is valid");
        // Every accepted table must render to source that syn can parse
        SourceEmitter::new()
            .render_source(&collected.table, &container)
            .expect("accepted constants must render");
    }
});
