use super::*;

fn family_with(codec: &str, encoding: &str) -> FamilyDescriptor {
    let config = ProvisionConfig {
        compression_codec: codec.to_string(),
        encoding: encoding.to_string(),
        ..test_config()
    };
    test_provisioner(MemoryCluster::new(), config)
        .family_descriptor(&ColumnFamilyMapping::new("F1", false))
}

#[test]
fn test_known_codecs() {
    let cases = [
        ("snappy", Compression::Snappy),
        ("SNAPPY", Compression::Snappy),
        ("lzo", Compression::Lzo),
        ("Lzo", Compression::Lzo),
        ("gz", Compression::Gz),
        ("gzip", Compression::Gz),
        ("GZIP", Compression::Gz),
        ("lz4", Compression::Lz4),
        ("LZ4", Compression::Lz4),
    ];

    for (codec, expected) in cases {
        assert_eq!(family_with(codec, "FAST_DIFF").compression, expected, "codec {:?}", codec);
    }
}

#[test]
fn test_unknown_codec_means_no_compression() {
    for codec in ["", "none", "zstd", "bzip2", "snappy2", " snappy ", "lz4\t"] {
        assert_eq!(family_with(codec, "FAST_DIFF").compression, Compression::None, "codec {:?}", codec);
    }
}

#[test]
fn test_encodings() {
    assert_eq!(family_with("none", "FAST_DIFF").encoding, DataBlockEncoding::FastDiff);
    assert_eq!(family_with("none", "PREFIX").encoding, DataBlockEncoding::Prefix);
    assert_eq!(family_with("none", "DIFF").encoding, DataBlockEncoding::Diff);
    assert_eq!(family_with("none", "ROW_INDEX_V1").encoding, DataBlockEncoding::RowIndexV1);
}

#[test]
fn test_unknown_encoding_means_none() {
    for encoding in ["", "fast_diff", "SNAPPY", "PREFIX "] {
        assert_eq!(family_with("none", encoding).encoding, DataBlockEncoding::None, "encoding {:?}", encoding);
    }
}

#[test]
fn test_block_size_tiers() {
    let config = ProvisionConfig {
        default_block_size: 4_194_304,
        small_family_block_size: 16_384,
        ..test_config()
    };
    let provisioner = test_provisioner(MemoryCluster::new(), config);

    let hungry = provisioner.family_descriptor(&ColumnFamilyMapping::new("F2", true));
    let small = provisioner.family_descriptor(&ColumnFamilyMapping::new("F1", false));
    assert_eq!(hungry.block_size, 4_194_304);
    assert_eq!(small.block_size, 16_384);
}

#[test]
fn test_one_family_per_mapping() {
    let families: Vec<_> = (0..5)
        .map(|i| ColumnFamilyMapping::new(format!("F{}", i), i % 2 == 0))
        .collect();
    let provisioner = test_provisioner(MemoryCluster::new(), test_config());

    let descriptor = provisioner.describe(&test_segment(families.clone()));
    assert_eq!(descriptor.families().len(), families.len());

    for (family, mapping) in descriptor.families().iter().zip(&families) {
        assert_eq!(family.name, mapping.name);
        assert_eq!(family.max_versions, 1);
        assert!(!family.in_memory);
        assert_eq!(family.bloom_filter, BloomType::None);
        assert_eq!(family.compression, Compression::Snappy);
    }
}
