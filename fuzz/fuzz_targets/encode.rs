#![no_main]

use configmeta::{encode, ConfigMapping, EncoderConfig, Format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mapping) = ConfigMapping::from_json_slice(data) {
        for format in [Format::Blob, Format::MetadataRoot] {
            let config = EncoderConfig::new().with_format(format);
            if let Ok(first) = encode(&mapping, &config) {
                assert_eq!(encode(&mapping, &config).ok(), Some(first));
            }
        }
    }
});
