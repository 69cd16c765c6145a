// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Matroska data model: one record per master element of the
//! schema, with fields bound to the schema element names.

use std::time::Duration;

use ebml_stream::{ebml_record, Date};

ebml_record! {
    /// The `\Segment` body root.
    pub struct Segment {
        "SeekHead" => pub seek_head: Vec<SeekHead>,
        "Info" => pub info: Info,
        "Cluster" => pub cluster: Vec<Cluster>,
        "Tracks" => pub tracks: Tracks,
        "Cues" => pub cues: Cues,
        "Attachments" => pub attachments: Attachments,
        "Chapters" => pub chapters: Chapters,
        "Tags" => pub tags: Vec<Tags>,
    }
}

ebml_record! {
    pub struct SeekHead {
        "Seek" => pub seek: Vec<Seek>,
    }
}

ebml_record! {
    pub struct Seek {
        "SeekID" => pub seek_id: Vec<u8>,
        "SeekPosition" => pub seek_position: u64,
    }
}

ebml_record! {
    pub struct Info {
        "SegmentUID" => pub segment_uid: Vec<u8>,
        "SegmentFilename" => pub segment_filename: String,
        "PrevUID" => pub prev_uid: Vec<u8>,
        "PrevFilename" => pub prev_filename: String,
        "NextUID" => pub next_uid: Vec<u8>,
        "NextFilename" => pub next_filename: String,
        "SegmentFamily" => pub segment_family: Vec<Vec<u8>>,
        "ChapterTranslate" => pub chapter_translate: Vec<ChapterTranslate>,
        "TimestampScale" => pub timestamp_scale: u64,
        "Duration" => pub duration: f64,
        "DateUTC" => pub date_utc: Date,
        "Title" => pub title: String,
        "MuxingApp" => pub muxing_app: String,
        "WritingApp" => pub writing_app: String,
    }
}

ebml_record! {
    pub struct ChapterTranslate {
        "ChapterTranslateEditionUID" => pub edition_uid: Vec<u64>,
        "ChapterTranslateCodec" => pub codec: u64,
        "ChapterTranslateID" => pub id: Vec<u8>,
    }
}

ebml_record! {
    pub struct Cluster {
        "Timestamp" => pub timestamp: u64,
        "SilentTracks" => pub silent_tracks: SilentTracks,
        "Position" => pub position: u64,
        "PrevSize" => pub prev_size: u64,
        "SimpleBlock" => pub simple_block: Vec<Vec<u8>>,
        "BlockGroup" => pub block_group: Vec<BlockGroup>,
        "EncryptedBlock" => pub encrypted_block: Vec<Vec<u8>>,
    }
}

ebml_record! {
    pub struct SilentTracks {
        "SilentTrackNumber" => pub silent_track_number: Vec<u64>,
    }
}

ebml_record! {
    pub struct BlockGroup {
        "Block" => pub block: Vec<u8>,
        "BlockVirtual" => pub block_virtual: Vec<u8>,
        "BlockAdditions" => pub block_additions: BlockAdditions,
        "BlockDuration" => pub block_duration: u64,
        "ReferencePriority" => pub reference_priority: u64,
        "ReferenceBlock" => pub reference_block: Vec<i64>,
        "ReferenceVirtual" => pub reference_virtual: i64,
        "CodecState" => pub codec_state: Vec<u8>,
        "DiscardPadding" => pub discard_padding: i64,
        "Slices" => pub slices: Slices,
        "ReferenceFrame" => pub reference_frame: ReferenceFrame,
    }
}

ebml_record! {
    pub struct BlockAdditions {
        "BlockMore" => pub block_more: Vec<BlockMore>,
    }
}

ebml_record! {
    pub struct BlockMore {
        "BlockAddID" => pub block_add_id: u64,
        "BlockAdditional" => pub block_additional: Vec<u8>,
    }
}

ebml_record! {
    pub struct Slices {
        "TimeSlice" => pub time_slice: Vec<TimeSlice>,
    }
}

ebml_record! {
    pub struct TimeSlice {
        "LaceNumber" => pub lace_number: u64,
        "FrameNumber" => pub frame_number: u64,
        "BlockAdditionID" => pub block_addition_id: u64,
        "Delay" => pub delay: u64,
        "SliceDuration" => pub slice_duration: u64,
    }
}

ebml_record! {
    pub struct ReferenceFrame {
        "ReferenceOffset" => pub reference_offset: u64,
        "ReferenceTimestamp" => pub reference_timestamp: u64,
    }
}

ebml_record! {
    pub struct Tracks {
        "TrackEntry" => pub track_entry: Vec<TrackEntry>,
    }
}

ebml_record! {
    pub struct TrackEntry {
        "TrackNumber" => pub track_number: u64,
        "TrackUID" => pub track_uid: u64,
        "TrackType" => pub track_type: u64,
        "FlagEnabled" => pub flag_enabled: u64,
        "FlagDefault" => pub flag_default: u64,
        "FlagForced" => pub flag_forced: u64,
        "FlagLacing" => pub flag_lacing: u64,
        "MinCache" => pub min_cache: u64,
        "MaxCache" => pub max_cache: u64,
        "DefaultDuration" => pub default_duration: Duration,
        "DefaultDecodedFieldDuration" => pub default_decoded_field_duration: Duration,
        "TrackTimestampScale" => pub track_timestamp_scale: f64,
        "TrackOffset" => pub track_offset: i64,
        "MaxBlockAdditionID" => pub max_block_addition_id: u64,
        "BlockAdditionMapping" => pub block_addition_mapping: Vec<BlockAdditionMapping>,
        "Name" => pub name: String,
        "Language" => pub language: String,
        "LanguageIETF" => pub language_ietf: String,
        "CodecID" => pub codec_id: String,
        "CodecPrivate" => pub codec_private: Vec<u8>,
        "CodecName" => pub codec_name: String,
        "AttachmentLink" => pub attachment_link: u64,
        "CodecSettings" => pub codec_settings: String,
        "CodecInfoURL" => pub codec_info_url: Vec<String>,
        "CodecDownloadURL" => pub codec_download_url: Vec<String>,
        "CodecDecodeAll" => pub codec_decode_all: u64,
        "TrackOverlay" => pub track_overlay: Vec<u64>,
        "CodecDelay" => pub codec_delay: u64,
        "SeekPreRoll" => pub seek_pre_roll: u64,
        "TrackTranslate" => pub track_translate: Vec<TrackTranslate>,
        "Video" => pub video: Video,
        "Audio" => pub audio: Audio,
        "TrackOperation" => pub track_operation: TrackOperation,
        "TrickTrackUID" => pub trick_track_uid: u64,
        "TrickTrackSegmentUID" => pub trick_track_segment_uid: Vec<u8>,
        "TrickTrackFlag" => pub trick_track_flag: u64,
        "TrickMasterTrackUID" => pub trick_master_track_uid: u64,
        "TrickMasterTrackSegmentUID" => pub trick_master_track_segment_uid: Vec<u8>,
        "ContentEncodings" => pub content_encodings: ContentEncodings,
    }
}

ebml_record! {
    pub struct BlockAdditionMapping {
        "BlockAddIDValue" => pub block_add_id_value: u64,
        "BlockAddIDName" => pub block_add_id_name: String,
        "BlockAddIDType" => pub block_add_id_type: u64,
        "BlockAddIDExtraData" => pub block_add_id_extra_data: Vec<u8>,
    }
}

ebml_record! {
    pub struct TrackTranslate {
        "TrackTranslateEditionUID" => pub edition_uid: Vec<u64>,
        "TrackTranslateCodec" => pub codec: u64,
        "TrackTranslateTrackID" => pub track_id: Vec<u8>,
    }
}

ebml_record! {
    pub struct Video {
        "FlagInterlaced" => pub flag_interlaced: u64,
        "FieldOrder" => pub field_order: u64,
        "StereoMode" => pub stereo_mode: u64,
        "AlphaMode" => pub alpha_mode: u64,
        "OldStereoMode" => pub old_stereo_mode: u64,
        "PixelWidth" => pub pixel_width: u64,
        "PixelHeight" => pub pixel_height: u64,
        "PixelCropBottom" => pub pixel_crop_bottom: u64,
        "PixelCropTop" => pub pixel_crop_top: u64,
        "PixelCropLeft" => pub pixel_crop_left: u64,
        "PixelCropRight" => pub pixel_crop_right: u64,
        "DisplayWidth" => pub display_width: u64,
        "DisplayHeight" => pub display_height: u64,
        "DisplayUnit" => pub display_unit: u64,
        "AspectRatioType" => pub aspect_ratio_type: u64,
        "ColourSpace" => pub colour_space: Vec<u8>,
        "GammaValue" => pub gamma_value: f64,
        "FrameRate" => pub frame_rate: f64,
        "Colour" => pub colour: Colour,
        "Projection" => pub projection: Projection,
    }
}

ebml_record! {
    pub struct Colour {
        "MatrixCoefficients" => pub matrix_coefficients: u64,
        "BitsPerChannel" => pub bits_per_channel: u64,
        "ChromaSubsamplingHorz" => pub chroma_subsampling_horz: u64,
        "ChromaSubsamplingVert" => pub chroma_subsampling_vert: u64,
        "CbSubsamplingHorz" => pub cb_subsampling_horz: u64,
        "CbSubsamplingVert" => pub cb_subsampling_vert: u64,
        "ChromaSitingHorz" => pub chroma_siting_horz: u64,
        "ChromaSitingVert" => pub chroma_siting_vert: u64,
        "Range" => pub range: u64,
        "TransferCharacteristics" => pub transfer_characteristics: u64,
        "Primaries" => pub primaries: u64,
        "MaxCLL" => pub max_cll: u64,
        "MaxFALL" => pub max_fall: u64,
        "MasteringMetadata" => pub mastering_metadata: MasteringMetadata,
    }
}

ebml_record! {
    pub struct MasteringMetadata {
        "PrimaryRChromaticityX" => pub primary_r_chromaticity_x: f64,
        "PrimaryRChromaticityY" => pub primary_r_chromaticity_y: f64,
        "PrimaryGChromaticityX" => pub primary_g_chromaticity_x: f64,
        "PrimaryGChromaticityY" => pub primary_g_chromaticity_y: f64,
        "PrimaryBChromaticityX" => pub primary_b_chromaticity_x: f64,
        "PrimaryBChromaticityY" => pub primary_b_chromaticity_y: f64,
        "WhitePointChromaticityX" => pub white_point_chromaticity_x: f64,
        "WhitePointChromaticityY" => pub white_point_chromaticity_y: f64,
        "LuminanceMax" => pub luminance_max: f64,
        "LuminanceMin" => pub luminance_min: f64,
    }
}

ebml_record! {
    pub struct Projection {
        "ProjectionType" => pub projection_type: u64,
        "ProjectionPrivate" => pub projection_private: Vec<u8>,
        "ProjectionPoseYaw" => pub pose_yaw: f64,
        "ProjectionPosePitch" => pub pose_pitch: f64,
        "ProjectionPoseRoll" => pub pose_roll: f64,
    }
}

ebml_record! {
    pub struct Audio {
        "SamplingFrequency" => pub sampling_frequency: f64,
        "OutputSamplingFrequency" => pub output_sampling_frequency: f64,
        "Channels" => pub channels: u64,
        "ChannelPositions" => pub channel_positions: Vec<u8>,
        "BitDepth" => pub bit_depth: u64,
    }
}

ebml_record! {
    pub struct TrackOperation {
        "TrackCombinePlanes" => pub track_combine_planes: TrackCombinePlanes,
        "TrackJoinBlocks" => pub track_join_blocks: TrackJoinBlocks,
    }
}

ebml_record! {
    pub struct TrackCombinePlanes {
        "TrackPlane" => pub track_plane: Vec<TrackPlane>,
    }
}

ebml_record! {
    pub struct TrackPlane {
        "TrackPlaneUID" => pub track_plane_uid: u64,
        "TrackPlaneType" => pub track_plane_type: u64,
    }
}

ebml_record! {
    pub struct TrackJoinBlocks {
        "TrackJoinUID" => pub track_join_uid: Vec<u64>,
    }
}

ebml_record! {
    pub struct ContentEncodings {
        "ContentEncoding" => pub content_encoding: Vec<ContentEncoding>,
    }
}

ebml_record! {
    pub struct ContentEncoding {
        "ContentEncodingOrder" => pub order: u64,
        "ContentEncodingScope" => pub scope: u64,
        "ContentEncodingType" => pub encoding_type: u64,
        "ContentCompression" => pub compression: ContentCompression,
        "ContentEncryption" => pub encryption: ContentEncryption,
    }
}

ebml_record! {
    pub struct ContentCompression {
        "ContentCompAlgo" => pub algo: u64,
        "ContentCompSettings" => pub settings: Vec<u8>,
    }
}

ebml_record! {
    pub struct ContentEncryption {
        "ContentEncAlgo" => pub algo: u64,
        "ContentEncKeyID" => pub key_id: Vec<u8>,
        "ContentEncAESSettings" => pub aes_settings: ContentEncAesSettings,
        "ContentSignature" => pub signature: Vec<u8>,
        "ContentSigKeyID" => pub sig_key_id: Vec<u8>,
        "ContentSigAlgo" => pub sig_algo: u64,
        "ContentSigHashAlgo" => pub sig_hash_algo: u64,
    }
}

ebml_record! {
    pub struct ContentEncAesSettings {
        "AESSettingsCipherMode" => pub cipher_mode: u64,
    }
}

ebml_record! {
    pub struct Cues {
        "CuePoint" => pub cue_point: Vec<CuePoint>,
    }
}

ebml_record! {
    pub struct CuePoint {
        "CueTime" => pub cue_time: u64,
        "CueTrackPositions" => pub cue_track_positions: Vec<CueTrackPositions>,
    }
}

ebml_record! {
    pub struct CueTrackPositions {
        "CueTrack" => pub cue_track: u64,
        "CueClusterPosition" => pub cue_cluster_position: u64,
        "CueRelativePosition" => pub cue_relative_position: u64,
        "CueDuration" => pub cue_duration: u64,
        "CueBlockNumber" => pub cue_block_number: u64,
        "CueCodecState" => pub cue_codec_state: u64,
        "CueReference" => pub cue_reference: Vec<CueReference>,
    }
}

ebml_record! {
    pub struct CueReference {
        "CueRefTime" => pub cue_ref_time: u64,
        "CueRefCluster" => pub cue_ref_cluster: u64,
        "CueRefNumber" => pub cue_ref_number: u64,
        "CueRefCodecState" => pub cue_ref_codec_state: u64,
    }
}

ebml_record! {
    pub struct Attachments {
        "AttachedFile" => pub attached_file: Vec<AttachedFile>,
    }
}

ebml_record! {
    pub struct AttachedFile {
        "FileDescription" => pub file_description: String,
        "FileName" => pub file_name: String,
        "FileMimeType" => pub file_mime_type: String,
        "FileData" => pub file_data: Vec<u8>,
        "FileUID" => pub file_uid: u64,
        "FileReferral" => pub file_referral: Vec<u8>,
        "FileUsedStartTime" => pub file_used_start_time: u64,
        "FileUsedEndTime" => pub file_used_end_time: u64,
    }
}

ebml_record! {
    pub struct Chapters {
        "EditionEntry" => pub edition_entry: Vec<EditionEntry>,
    }
}

ebml_record! {
    pub struct EditionEntry {
        "EditionUID" => pub edition_uid: u64,
        "EditionFlagHidden" => pub edition_flag_hidden: u64,
        "EditionFlagDefault" => pub edition_flag_default: u64,
        "EditionFlagOrdered" => pub edition_flag_ordered: u64,
        "ChapterAtom" => pub chapter_atom: Vec<ChapterAtom>,
    }
}

ebml_record! {
    pub struct ChapterAtom {
        "ChapterUID" => pub chapter_uid: u64,
        "ChapterStringUID" => pub chapter_string_uid: String,
        "ChapterTimeStart" => pub chapter_time_start: u64,
        "ChapterTimeEnd" => pub chapter_time_end: u64,
        "ChapterFlagHidden" => pub chapter_flag_hidden: u64,
        "ChapterFlagEnabled" => pub chapter_flag_enabled: u64,
        "ChapterSegmentUID" => pub chapter_segment_uid: Vec<u8>,
        "ChapterSegmentEditionUID" => pub chapter_segment_edition_uid: u64,
        "ChapterPhysicalEquiv" => pub chapter_physical_equiv: u64,
        "ChapterTrack" => pub chapter_track: ChapterTrack,
        "ChapterDisplay" => pub chapter_display: Vec<ChapterDisplay>,
        "ChapProcess" => pub chap_process: Vec<ChapProcess>,
    }
}

ebml_record! {
    pub struct ChapterTrack {
        "ChapterTrackUID" => pub chapter_track_uid: Vec<u64>,
    }
}

ebml_record! {
    pub struct ChapterDisplay {
        "ChapString" => pub chap_string: String,
        "ChapLanguage" => pub chap_language: Vec<String>,
        "ChapLanguageIETF" => pub chap_language_ietf: Vec<String>,
        "ChapCountry" => pub chap_country: Vec<String>,
    }
}

ebml_record! {
    pub struct ChapProcess {
        "ChapProcessCodecID" => pub chap_process_codec_id: u64,
        "ChapProcessPrivate" => pub chap_process_private: Vec<u8>,
        "ChapProcessCommand" => pub chap_process_command: Vec<ChapProcessCommand>,
    }
}

ebml_record! {
    pub struct ChapProcessCommand {
        "ChapProcessTime" => pub chap_process_time: u64,
        "ChapProcessData" => pub chap_process_data: Vec<u8>,
    }
}

ebml_record! {
    pub struct Tags {
        "Tag" => pub tag: Vec<Tag>,
    }
}

ebml_record! {
    pub struct Tag {
        "Targets" => pub targets: Targets,
        "SimpleTag" => pub simple_tag: Vec<SimpleTag>,
    }
}

ebml_record! {
    pub struct Targets {
        "TargetTypeValue" => pub target_type_value: u64,
        "TargetType" => pub target_type: String,
        "TagTrackUID" => pub tag_track_uid: Vec<u64>,
        "TagEditionUID" => pub tag_edition_uid: Vec<u64>,
        "TagChapterUID" => pub tag_chapter_uid: Vec<u64>,
        "TagAttachmentUID" => pub tag_attachment_uid: Vec<u64>,
    }
}

ebml_record! {
    pub struct SimpleTag {
        "TagName" => pub tag_name: String,
        "TagLanguage" => pub tag_language: String,
        "TagLanguageIETF" => pub tag_language_ietf: String,
        "TagDefault" => pub tag_default: u64,
        "TagString" => pub tag_string: String,
        "TagBinary" => pub tag_binary: Vec<u8>,
    }
}
