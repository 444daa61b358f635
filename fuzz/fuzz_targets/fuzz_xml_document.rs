#![no_main]

use libfuzzer_sys::fuzz_target;

use clickonce::xml::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and writing back should never panic
        if let Ok(doc) = Document::parse(content) {
            let written = doc.to_xml_string();
            let _ = Document::parse(&written);
        }
    }
});
