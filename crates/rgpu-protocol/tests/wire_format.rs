use rgpu_protocol::{
    decode_bind_group, decode_entry, encode_bind_group, encode_entry, BackingBindGroup,
    BackingBindGroupEntry, BackingBufferBinding, BackingResource, BindingResourceType, DecodeError,
};

#[test]
fn resource_type_tags_are_stable() {
    // These values are shared with the peer process; renumbering them is a
    // protocol break.
    assert_eq!(BindingResourceType::Sampler as u32, 0);
    assert_eq!(BindingResourceType::TextureView as u32, 1);
    assert_eq!(BindingResourceType::BufferBinding as u32, 2);
    assert_eq!(BindingResourceType::ExternalTexture as u32, 3);

    for v in 0..4 {
        let tag = BindingResourceType::from_u32(v).expect("known tag");
        assert_eq!(tag as u32, v);
    }
    assert_eq!(BindingResourceType::from_u32(4), None);
    assert_eq!(BindingResourceType::from_u32(u32::MAX), None);
}

#[test]
fn sampler_entry_golden_bytes() {
    let entry = BackingBindGroupEntry {
        binding: 3,
        resource: BackingResource::Sampler(1),
    };
    let bytes = encode_entry(&entry);
    #[rustfmt::skip]
    let expected = [
        0x03, 0x00, 0x00, 0x00, // binding
        0x00, 0x00, 0x00, 0x00, // tag: Sampler
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // identifier
    ];
    assert_eq!(bytes, expected);
    assert_eq!(decode_entry(&bytes).unwrap(), entry);
}

#[test]
fn buffer_entry_golden_bytes() {
    let entry = BackingBindGroupEntry {
        binding: 1,
        resource: BackingResource::Buffer(BackingBufferBinding {
            buffer: 7,
            offset: 256,
            size: Some(64),
        }),
    };
    let bytes = encode_entry(&entry);
    #[rustfmt::skip]
    let expected = [
        0x01, 0x00, 0x00, 0x00, // binding
        0x02, 0x00, 0x00, 0x00, // tag: BufferBinding
        0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // identifier == buffer
        0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // offset
        0x01,                                           // size present
        0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // size
    ];
    assert_eq!(bytes, expected);
    assert_eq!(decode_entry(&bytes).unwrap(), entry);
}

#[test]
fn buffer_entry_whole_buffer_size() {
    let entry = BackingBindGroupEntry {
        binding: 0,
        resource: BackingResource::Buffer(BackingBufferBinding {
            buffer: 9,
            offset: 0,
            size: None,
        }),
    };
    let bytes = encode_entry(&entry);
    // No sentinel: absence is an explicit presence byte, so any legitimate
    // size value round-trips.
    assert_eq!(bytes.len(), 4 + 4 + 8 + 8 + 1);
    assert_eq!(decode_entry(&bytes).unwrap(), entry);
}

#[test]
fn texture_view_and_external_texture_round_trip() {
    for resource in [
        BackingResource::TextureView(0x1234_5678_9abc_def0),
        BackingResource::ExternalTexture(u64::MAX),
    ] {
        let entry = BackingBindGroupEntry {
            binding: 42,
            resource,
        };
        assert_eq!(decode_entry(&encode_entry(&entry)).unwrap(), entry);
    }
}

#[test]
fn generic_identifier_slot_matches_buffer_identifier() {
    let resource = BackingResource::Buffer(BackingBufferBinding {
        buffer: 11,
        offset: 0,
        size: None,
    });
    assert_eq!(resource.identifier(), 11);
}

#[test]
fn unknown_tag_is_rejected() {
    let mut bytes = encode_entry(&BackingBindGroupEntry {
        binding: 0,
        resource: BackingResource::Sampler(5),
    });
    // Corrupt the tag field.
    bytes[4] = 0x2a;
    assert_eq!(decode_entry(&bytes), Err(DecodeError::UnknownTag(0x2a)));
}

#[test]
fn zero_identifier_is_rejected() {
    #[rustfmt::skip]
    let bytes = [
        0x00, 0x00, 0x00, 0x00, // binding
        0x00, 0x00, 0x00, 0x00, // tag: Sampler
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // identifier 0
    ];
    assert_eq!(decode_entry(&bytes), Err(DecodeError::InvalidIdentifier));
}

#[test]
fn truncated_entry_is_rejected() {
    let bytes = encode_entry(&BackingBindGroupEntry {
        binding: 2,
        resource: BackingResource::Buffer(BackingBufferBinding {
            buffer: 3,
            offset: 16,
            size: Some(32),
        }),
    });
    for len in 0..bytes.len() {
        assert_eq!(
            decode_entry(&bytes[..len]),
            Err(DecodeError::UnexpectedEof),
            "prefix of {len} bytes"
        );
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = encode_entry(&BackingBindGroupEntry {
        binding: 0,
        resource: BackingResource::TextureView(8),
    });
    bytes.push(0);
    assert_eq!(decode_entry(&bytes), Err(DecodeError::TrailingBytes));
}

#[test]
fn bind_group_round_trip() {
    let group = BackingBindGroup {
        label: Some("material".to_string()),
        entries: vec![
            BackingBindGroupEntry {
                binding: 0,
                resource: BackingResource::Buffer(BackingBufferBinding {
                    buffer: 1,
                    offset: 0,
                    size: Some(128),
                }),
            },
            BackingBindGroupEntry {
                binding: 1,
                resource: BackingResource::TextureView(2),
            },
            BackingBindGroupEntry {
                binding: 2,
                resource: BackingResource::Sampler(3),
            },
            BackingBindGroupEntry {
                binding: 3,
                resource: BackingResource::ExternalTexture(4),
            },
        ],
    };
    let bytes = encode_bind_group(&group);
    assert_eq!(decode_bind_group(&bytes).unwrap(), group);
}

#[test]
fn unlabelled_bind_group_round_trip() {
    let group = BackingBindGroup {
        label: None,
        entries: Vec::new(),
    };
    let bytes = encode_bind_group(&group);
    assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(decode_bind_group(&bytes).unwrap(), group);
}

#[test]
fn bind_group_entry_count_is_bounded() {
    // has_label=0, then an entry count far above the defensive cap.
    let mut bytes = vec![0x00];
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    assert_eq!(decode_bind_group(&bytes), Err(DecodeError::OversizedPayload));
}

#[test]
fn bind_group_bad_label_utf8_is_rejected() {
    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&2u32.to_le_bytes());
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(decode_bind_group(&bytes), Err(DecodeError::InvalidUtf8));
}

#[test]
fn oversized_payload_is_rejected() {
    let bytes = vec![0u8; rgpu_protocol::MAX_MESSAGE_BYTES + 1];
    assert_eq!(decode_entry(&bytes), Err(DecodeError::OversizedPayload));
    assert_eq!(decode_bind_group(&bytes), Err(DecodeError::OversizedPayload));
}
