// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for pinned-list decoding and the path catalog helpers

#![no_main]

use libfuzzer_sys::fuzz_target;
use rove_core::catalog;
use rove_prefs::pinned::{decode, encode, DEFAULT_DELIMITER};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Decoding is idempotent once blanks and repeats are gone
        let folders = decode(input, DEFAULT_DELIMITER);
        let stored = encode(&folders, DEFAULT_DELIMITER);
        assert_eq!(decode(&stored, DEFAULT_DELIMITER), folders);

        let path = Path::new(input);
        let name = catalog::file_name(path);
        let _ = catalog::extension(&name);
        let query = input.get(..input.len() / 2).unwrap_or("");
        let _ = catalog::name_matches(path, query);
    }

    if data.len() >= 8 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&data[..8]);
        assert!(!catalog::format_size(u64::from_le_bytes(bytes)).is_empty());
    }
});
