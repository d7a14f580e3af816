//! Export integration tests
//!
//! WAV sources on disk are loaded through the builder's loader, mixed
//! offline, and exported as WAV bytes.

use crate::helpers::tolerances::{FLOAT_EPSILON, INT16_EPSILON};
use crate::helpers::*;
use medley::export::format::wav::{encode_wav_file, WavConfig};
use medley::export::decode_wav_memory;
use medley::prelude::*;
use std::path::Path;

fn write_source(dir: &Path, name: &str, samples: &[f32]) {
    encode_wav_file(
        &[samples],
        &dir.join(name),
        &WavConfig::mono(TEST_SAMPLE_RATE, BitDepth::Float32),
    )
    .expect("Failed to write source");
}

async fn export_wav(playlist: &mut Playlist) -> Vec<u8> {
    let task = playlist
        .start_offline_render(RenderRequest::wav())
        .expect("no render in flight");
    match task.run().await.expect("render failed") {
        RenderOutput::Wav(bytes) => bytes,
        other => panic!("expected WAV bytes, got {:?}", other.kind()),
    }
}

/// Load WAV files relative to the root, mix, export as float WAV.
#[tokio::test]
async fn test_wav_sources_to_wav_mixdown() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "drums.wav", &vec![0.25; frames(2.0)]);
    write_source(dir.path(), "bass.wav", &vec![0.5; frames(1.0)]);

    let mut playlist = medley::builder()
        .config(test_config())
        .root(dir.path())
        .bit_depth(BitDepth::Float32)
        .build()
        .unwrap();
    let ids = playlist
        .load(vec![
            TrackInfo::new("drums.wav"),
            TrackInfo {
                start: 1.0,
                ..TrackInfo::new("bass.wav")
            },
        ])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(playlist.duration(), 2.0);

    let bytes = export_wav(&mut playlist).await;
    let mix = decode_wav_memory(&bytes).unwrap();
    assert_eq!(mix.sample_rate(), TEST_SAMPLE_RATE);
    assert_eq!(mix.number_of_channels(), 2);
    assert_eq!(mix.len(), frames(2.0));

    let left = mix.channel_data(0).unwrap();
    assert!((left[frames(0.5)] - 0.25).abs() < FLOAT_EPSILON);
    assert!((left[frames(1.5)] - 0.75).abs() < FLOAT_EPSILON);
}

/// Default export is 16-bit PCM; levels survive within quantization.
#[tokio::test]
async fn test_default_export_is_16_bit() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "tone.wav", &vec![0.5; frames(1.0)]);

    let mut playlist = medley::builder()
        .config(test_config())
        .root(dir.path())
        .build()
        .unwrap();
    playlist.load(vec![TrackInfo::new("tone.wav")]).await.unwrap();

    let bytes = export_wav(&mut playlist).await;
    let reader = hound::WavReader::new(std::io::Cursor::new(&bytes)).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);

    let mix = decode_wav_memory(&bytes).unwrap();
    let peak_level = peak(mix.channel_data(0).unwrap());
    assert!((peak_level - 0.5).abs() <= INT16_EPSILON * 2.0);
}

/// A missing source fails the whole load and leaves the playlist empty.
#[tokio::test]
async fn test_missing_source_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "present.wav", &vec![0.5; frames(1.0)]);

    let mut playlist = medley::builder()
        .config(test_config())
        .root(dir.path())
        .build()
        .unwrap();
    let result = playlist
        .load(vec![TrackInfo::new("present.wav"), TrackInfo::new("absent.wav")])
        .await;

    assert!(matches!(result, Err(medley::core::Error::Load(_))));
    assert!(playlist.tracks().is_empty());
    assert_eq!(playlist.duration(), 0.0);
}

/// Track descriptors deserialize from JSON session files.
#[tokio::test]
async fn test_json_session_loads() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "vox.wav", &vec![0.5; frames(4.0)]);

    let session = r#"[
        { "src": "vox.wav", "name": "Vocals", "start": 1.0, "cuein": 1.0, "cueout": 3.0, "gain": 0.5 }
    ]"#;
    let infos: Vec<TrackInfo> = serde_json::from_str(session).unwrap();

    let mut playlist = medley::builder()
        .config(test_config())
        .root(dir.path())
        .build()
        .unwrap();
    let ids = playlist.load(infos).await.unwrap();

    let track = playlist.track(ids[0]).unwrap();
    assert_eq!(track.name(), "Vocals");
    assert_eq!(track.duration(), 2.0);
    assert_eq!(playlist.duration(), 3.0);

    let bytes = export_wav(&mut playlist).await;
    let mix = decode_wav_memory(&bytes).unwrap();
    assert!(is_silent(&mix.channel_data(0).unwrap()[..frames(1.0)]));
}
