//! Offline render integration tests
//!
//! The offline mixdown must reproduce what the live context plays from zero,
//! sample for sample, including solo/mute and gain state.

use crate::helpers::tolerances::FLOAT_EPSILON;
use crate::helpers::*;
use medley::prelude::*;

async fn render_buffer(playlist: &mut Playlist, request: RenderRequest) -> AudioBuffer {
    let task = playlist
        .start_offline_render(request)
        .expect("no render in flight");
    match task.run().await.expect("render failed") {
        RenderOutput::Buffer(buffer) => buffer,
        other => panic!("expected a buffer, got {:?}", other.kind()),
    }
}

/// A muted track is absent from the mixdown, and the mixdown is bit-identical
/// to the live mix of the same session.
#[tokio::test]
async fn test_offline_matches_live_with_muted_track() {
    let (mut playlist, ids) = test_playlist(
        test_config(),
        vec![
            Source::at(0.0, sine(220.0, 3.0, 0.4)),
            Source::at(0.5, sine(330.0, 2.0, 0.3)),
            Source::at(1.0, sine(440.0, 2.0, 0.2)),
        ],
    )
    .await;
    playlist.mute_track(ids[1]).unwrap();
    playlist.set_track_gain(ids[2], 0.5).unwrap();

    let offline = render_buffer(&mut playlist, RenderRequest::buffer()).await;
    assert_eq!(offline.number_of_channels(), 2);
    assert_eq!(offline.len(), frames(3.0));

    let _ = playlist.play(Some(0.0), None).await;
    let (left, right) = playlist.context().render_frames(offline.len());

    assert_eq!(offline.channel_data(0).unwrap(), &left[..]);
    assert_eq!(offline.channel_data(1).unwrap(), &right[..]);

    // Unmuting changes the mixdown
    playlist.mute_track(ids[1]).unwrap();
    let with_second = render_buffer(&mut playlist, RenderRequest::buffer()).await;
    assert_ne!(with_second.channel_data(0).unwrap(), offline.channel_data(0).unwrap());
}

/// A at [0, 10), B at [5, 15): at 12s only B is heard, live and offline.
#[tokio::test]
async fn test_only_later_track_audible_after_first_ends() {
    let (mut playlist, _) = test_playlist(
        test_config(),
        vec![Source::at(0.0, dc(10.0, 0.25)), Source::at(5.0, dc(10.0, 0.5))],
    )
    .await;
    assert!(playlist.duration() >= 15.0);

    let _ = playlist.play(None, None).await;
    let (left, _) = playlist.context().render_frames(frames(7.0));
    assert!(left[..frames(5.0)].iter().all(|s| *s == 0.25));
    assert!(left[frames(5.0)..].iter().all(|s| *s == 0.75));

    playlist.context().render_frames(frames(5.0));
    let (left, right) = playlist.context().render_frames(frames(0.5));
    assert!(left.iter().all(|s| *s == 0.5));
    assert!(right.iter().all(|s| *s == 0.5));
    assert_eq!(playlist.context().handle().active_voices(), 1);

    let offline = render_buffer(&mut playlist, RenderRequest::buffer()).await;
    let at_twelve = offline.channel_data(0).unwrap()[frames(12.0)];
    assert!((at_twelve - 0.5).abs() < FLOAT_EPSILON);
}

/// The request's master gain scales the mixdown, independent of live state.
#[tokio::test]
async fn test_render_master_gain() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(1.0, 0.5))]).await;

    let request = RenderRequest {
        master_gain: 0.5,
        ..RenderRequest::buffer()
    };
    let buffer = render_buffer(&mut playlist, request).await;
    assert!(buffer.channel_data(0).unwrap().iter().all(|s| *s == 0.25));
    assert_eq!(playlist.master_gain(), 1.0);
}

/// Fades are rendered offline exactly as scheduled live.
#[tokio::test]
async fn test_offline_fades_match_live() {
    let (mut playlist, ids) = test_playlist(test_config(), vec![Source::at(0.0, dc(2.0, 0.5))]).await;
    playlist.set_fade_type(FadeShape::Linear);
    playlist.set_fade_in(ids[0], 0.5).unwrap();
    playlist.set_fade_out(ids[0], 0.5).unwrap();

    let offline = render_buffer(&mut playlist, RenderRequest::buffer()).await;
    let data = offline.channel_data(0).unwrap();
    assert!(data[0].abs() < FLOAT_EPSILON);
    assert!((data[frames(1.0)] - 0.5).abs() < FLOAT_EPSILON);
    assert!(data[frames(0.25)] < data[frames(0.5)]);

    let _ = playlist.play(Some(0.0), None).await;
    let (left, _) = playlist.context().render_frames(offline.len());
    assert_eq!(data, &left[..]);
}

/// Only one render at a time; completion or failure frees the slot and
/// is reported on the event stream.
#[tokio::test]
async fn test_render_lifecycle_events() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(1.0, 0.5))]).await;
    let events = playlist.events();
    events.try_iter().for_each(drop);

    let task = playlist.start_offline_render(RenderRequest::buffer()).unwrap();
    assert!(playlist.is_rendering());
    assert!(playlist.start_offline_render(RenderRequest::buffer()).is_none());

    task.run().await.unwrap();
    assert!(!playlist.is_rendering());
    assert!(events
        .try_iter()
        .any(|e| matches!(e, PlaylistEvent::AudioRenderingFinished(RenderOutput::Buffer(_)))));

    // Nothing to render once the playlist is empty
    playlist.clear().await.unwrap();
    let task = playlist.start_offline_render(RenderRequest::buffer()).unwrap();
    assert!(task.run().await.is_err());
    assert!(!playlist.is_rendering());
    assert!(events
        .try_iter()
        .any(|e| matches!(e, PlaylistEvent::AudioRenderingFailed(_))));
}
