// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end decoding of a small, hand-assembled Matroska stream.

use std::io::Cursor;

use ebml_stream::{primitive, vint, Decoder};
use ebml_stream_matroska::Segment;

fn elem(buf: &mut Vec<u8>, id: u64, payload: &[u8]) {
    vint::append_id(buf, id);
    vint::append_vint_data(buf, payload.len() as u64, 0);
    buf.extend_from_slice(payload);
}

fn unknown_size_elem(buf: &mut Vec<u8>, id: u64) {
    vint::append_id(buf, id);
    buf.push(0xff);
}

fn uint_elem(buf: &mut Vec<u8>, id: u64, value: u64) {
    let mut payload = Vec::new();
    primitive::append_uint(&mut payload, value);
    elem(buf, id, &payload);
}

fn str_elem(buf: &mut Vec<u8>, id: u64, value: &str) {
    elem(buf, id, value.as_bytes());
}

fn float_elem(buf: &mut Vec<u8>, id: u64, value: f64) {
    let mut payload = Vec::new();
    primitive::append_float64(&mut payload, value);
    elem(buf, id, &payload);
}

fn ebml_header(doc_type: &str) -> Vec<u8> {
    let mut header = Vec::new();
    uint_elem(&mut header, 0x4286, 1); // EBMLVersion
    uint_elem(&mut header, 0x42f7, 1); // EBMLReadVersion
    uint_elem(&mut header, 0x42f2, 4); // EBMLMaxIDLength
    uint_elem(&mut header, 0x42f3, 8); // EBMLMaxSizeLength
    str_elem(&mut header, 0x4282, doc_type);
    uint_elem(&mut header, 0x4287, 4); // DocTypeVersion
    uint_elem(&mut header, 0x4285, 2); // DocTypeReadVersion
    let mut buf = Vec::new();
    elem(&mut buf, 0x1a45dfa3, &header);
    buf
}

/// Builds a stream with an unknown-size Segment: Info, Tracks, an
/// unknown-size Cluster ended by a known-size sibling Cluster, Cues and
/// Tags, with Void elements sprinkled in.
fn sample_stream() -> Vec<u8> {
    let mut buf = ebml_header("matroska");

    // A root-level Void before the body root must be skipped.
    elem(&mut buf, 0xec, &[0; 4]);

    unknown_size_elem(&mut buf, 0x18538067); // Segment

    let mut info = Vec::new();
    uint_elem(&mut info, 0x2ad7b1, 500_000); // TimestampScale
    float_elem(&mut info, 0x4489, 1000.0); // Duration
    elem(&mut info, 0x4461, &[0u8; 8]); // DateUTC at the epoch
    str_elem(&mut info, 0x4d80, "ebml-stream"); // MuxingApp
    str_elem(&mut info, 0x5741, "decode-test"); // WritingApp
    elem(&mut buf, 0x1549a966, &info);

    // A Void inside the Segment is a global element.
    elem(&mut buf, 0xec, &[0; 2]);

    let mut video = Vec::new();
    uint_elem(&mut video, 0xb0, 1920); // PixelWidth
    uint_elem(&mut video, 0xba, 1080); // PixelHeight
    let mut track_one = Vec::new();
    uint_elem(&mut track_one, 0xd7, 1); // TrackNumber
    uint_elem(&mut track_one, 0x73c5, 0xcafe); // TrackUID
    uint_elem(&mut track_one, 0x83, 1); // TrackType: video
    str_elem(&mut track_one, 0x86, "V_TEST"); // CodecID
    uint_elem(&mut track_one, 0x23e383, 33_366_667); // DefaultDuration
    elem(&mut track_one, 0xe0, &video);

    let mut track_two = Vec::new();
    uint_elem(&mut track_two, 0xd7, 2);
    uint_elem(&mut track_two, 0x73c5, 0xbeef);
    uint_elem(&mut track_two, 0x83, 2); // TrackType: audio
    str_elem(&mut track_two, 0x86, "A_TEST");
    elem(&mut track_two, 0xe1, &[]); // empty Audio master

    let mut tracks = Vec::new();
    elem(&mut tracks, 0xae, &track_one);
    elem(&mut tracks, 0xae, &track_two);
    elem(&mut buf, 0x1654ae6b, &tracks);

    // First Cluster has an unknown size; the second Cluster ends it.
    unknown_size_elem(&mut buf, 0x1f43b675);
    uint_elem(&mut buf, 0xe7, 0); // Timestamp
    elem(&mut buf, 0xa3, &[0x81, 0x00, 0x00, 0x80, 0xaa]); // SimpleBlock
    elem(&mut buf, 0xa3, &[0x81, 0x00, 0x10, 0x80, 0xbb]);

    let mut cluster = Vec::new();
    uint_elem(&mut cluster, 0xe7, 1000);
    elem(&mut cluster, 0xa3, &[0x81, 0x00, 0x20, 0x80, 0xcc]);
    elem(&mut buf, 0x1f43b675, &cluster);

    let mut positions = Vec::new();
    uint_elem(&mut positions, 0xf7, 1); // CueTrack
    uint_elem(&mut positions, 0xf1, 64); // CueClusterPosition
    let mut point = Vec::new();
    uint_elem(&mut point, 0xb3, 0); // CueTime
    elem(&mut point, 0xb7, &positions);
    let mut cues = Vec::new();
    elem(&mut cues, 0xbb, &point);
    elem(&mut buf, 0x1c53bb6b, &cues);

    // A nested SimpleTag has no field in the model and must be skipped.
    let mut nested = Vec::new();
    str_elem(&mut nested, 0x45a3, "PART_NUMBER");
    let mut simple_tag = Vec::new();
    str_elem(&mut simple_tag, 0x45a3, "TITLE"); // TagName
    str_elem(&mut simple_tag, 0x4487, "decode test"); // TagString
    elem(&mut simple_tag, 0x67c8, &nested);
    let mut tag = Vec::new();
    elem(&mut tag, 0x63c0, &[]); // empty Targets
    elem(&mut tag, 0x67c8, &simple_tag);
    let mut tags = Vec::new();
    elem(&mut tags, 0x7373, &tag);
    elem(&mut buf, 0x1254c367, &tags);

    buf
}

#[test]
fn decode_sample_stream() {
    ebml_stream_matroska::register();

    let mut decoder = Decoder::new(Cursor::new(sample_stream()));

    let header = decoder.decode_header().unwrap();
    assert_eq!(header.doc_type, "matroska");
    assert_eq!(header.version, 1);
    assert_eq!(header.max_id_length, 4);
    assert_eq!(header.max_size_length, 8);
    assert_eq!(header.doc_type_version, 4);
    assert_eq!(header.doc_type_read_version, 2);

    let mut segment = Segment::default();
    decoder.decode_body(&mut segment).unwrap();

    // Info, with the explicit TimestampScale overriding the default.
    assert_eq!(segment.info.timestamp_scale, 500_000);
    assert_eq!(segment.info.duration, 1000.0);
    assert_eq!(segment.info.date_utc, ebml_stream::Date::default());
    assert_eq!(segment.info.muxing_app, "ebml-stream");
    assert_eq!(segment.info.writing_app, "decode-test");

    // Tracks, including schema defaults for absent children.
    assert_eq!(segment.tracks.track_entry.len(), 2);
    let video = &segment.tracks.track_entry[0];
    assert_eq!(video.track_number, 1);
    assert_eq!(video.track_uid, 0xcafe);
    assert_eq!(video.codec_id, "V_TEST");
    assert_eq!(video.flag_enabled, 1); // default
    assert_eq!(video.language, "eng"); // default
    assert_eq!(video.track_timestamp_scale, 1.0); // default, hex float
    assert_eq!(video.default_duration, std::time::Duration::from_nanos(33_366_667));
    assert_eq!(video.video.pixel_width, 1920);
    assert_eq!(video.video.pixel_height, 1080);

    let audio = &segment.tracks.track_entry[1];
    assert_eq!(audio.track_number, 2);
    // The empty Audio master still picks up its children's defaults.
    assert_eq!(audio.audio.sampling_frequency, 8000.0);
    assert_eq!(audio.audio.channels, 1);

    // The unknown-size Cluster ended exactly at its sibling.
    assert_eq!(segment.cluster.len(), 2);
    assert_eq!(segment.cluster[0].timestamp, 0);
    assert_eq!(segment.cluster[0].simple_block.len(), 2);
    assert_eq!(segment.cluster[0].simple_block[1], vec![0x81, 0x00, 0x10, 0x80, 0xbb]);
    assert_eq!(segment.cluster[1].timestamp, 1000);
    assert_eq!(segment.cluster[1].simple_block.len(), 1);

    assert_eq!(segment.cues.cue_point.len(), 1);
    assert_eq!(segment.cues.cue_point[0].cue_track_positions[0].cue_cluster_position, 64);

    // Tags: the nested SimpleTag was skipped, the outer one decoded.
    assert_eq!(segment.tags.len(), 1);
    let simple_tag = &segment.tags[0].tag[0].simple_tag[0];
    assert_eq!(simple_tag.tag_name, "TITLE");
    assert_eq!(simple_tag.tag_string, "decode test");
    assert_eq!(simple_tag.tag_language, "und"); // default
    assert_eq!(segment.tags[0].tag[0].targets.target_type_value, 50); // default
}

#[test]
fn decode_webm_doc_type() {
    ebml_stream_matroska::register();

    let mut buf = ebml_header("webm");
    unknown_size_elem(&mut buf, 0x18538067);
    let mut info = Vec::new();
    str_elem(&mut info, 0x4d80, "webm-writer");
    elem(&mut buf, 0x1549a966, &info);

    let mut decoder = Decoder::new(Cursor::new(buf));
    let header = decoder.decode_header().unwrap();
    assert_eq!(header.doc_type, "webm");

    let mut segment = Segment::default();
    decoder.decode_body(&mut segment).unwrap();
    assert_eq!(segment.info.muxing_app, "webm-writer");
    // The default applies when TimestampScale is absent.
    assert_eq!(segment.info.timestamp_scale, 1_000_000);
}

#[test]
fn unregistered_doc_type_fails() {
    ebml_stream_matroska::register();

    let buf = ebml_header("quicktime");
    let mut decoder = Decoder::new(Cursor::new(buf));
    assert!(matches!(decoder.decode_header(), Err(ebml_stream::Error::UnknownDocType(_))));
}
