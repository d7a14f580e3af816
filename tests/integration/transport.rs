//! Transport integration tests
//!
//! Tests the play/pause/stop state machine, seeking, restarts and solo/mute
//! as heard through the live context.

use crate::helpers::tolerances::TIME_EPSILON;
use crate::helpers::*;
use approx::assert_relative_eq;
use medley::prelude::*;

/// Pausing and resuming must not move the playback position.
#[tokio::test]
async fn test_play_pause_play_has_no_drift() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(10.0, 0.5))]).await;

    let _ = playlist.play(None, None).await;
    playlist.context().render_frames(frames(1.5));
    playlist.pause().await;
    let paused_at = playlist.current_time();
    assert_relative_eq!(paused_at, 1.5, epsilon = TIME_EPSILON);

    // Time passing while paused changes nothing
    playlist.context().render_frames(frames(2.0));
    assert_relative_eq!(playlist.current_time(), paused_at, epsilon = TIME_EPSILON);

    let _ = playlist.play(None, None).await;
    assert_relative_eq!(playlist.current_time(), paused_at, epsilon = TIME_EPSILON);

    playlist.context().render_frames(frames(1.0));
    assert_relative_eq!(playlist.current_time(), 2.5, epsilon = TIME_EPSILON);
}

/// Repeated pause/resume cycles accumulate exactly the played time.
#[tokio::test]
async fn test_many_pause_cycles_accumulate_exactly() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(20.0, 0.5))]).await;

    for _ in 0..5 {
        let _ = playlist.play(None, None).await;
        playlist.context().render_frames(frames(0.75));
        playlist.pause().await;
        playlist.context().render_frames(frames(0.3));
    }
    assert_relative_eq!(playlist.current_time(), 3.75, epsilon = TIME_EPSILON);
}

/// Seeking while stopped, then playing, starts from the seek position.
#[tokio::test]
async fn test_seek_while_stopped_then_play() {
    let (mut playlist, _) = test_playlist(
        test_config(),
        vec![Source::at(0.0, dc(10.0, 0.25)), Source::at(6.0, dc(4.0, 0.5))],
    )
    .await;

    playlist.seek(5.0, None, None).await.unwrap();
    assert_eq!(playlist.play_state(), PlayState::Stopped);

    let _ = playlist.play(None, None).await;
    assert_relative_eq!(playlist.current_time(), 5.0, epsilon = TIME_EPSILON);

    // Only the first track before 6s, both after
    let (left, _) = playlist.context().render_frames(frames(0.5));
    assert!(left.iter().all(|s| *s == 0.25));
    playlist.context().render_frames(frames(0.5));
    let (left, _) = playlist.context().render_frames(frames(0.5));
    assert!(left.iter().all(|s| *s == 0.75));
}

/// Seeking while playing restarts every track once; no segments overlap.
#[tokio::test]
async fn test_seek_while_playing_never_overlaps() {
    let (mut playlist, _) = test_playlist(
        test_config(),
        vec![Source::at(0.0, dc(10.0, 0.25)), Source::at(0.0, dc(10.0, 0.5))],
    )
    .await;

    let first = playlist.play(None, None).await;
    playlist.context().render_frames(frames(1.0));

    playlist.seek(3.0, None, None).await.unwrap();
    playlist.seek(7.0, None, None).await.unwrap();
    assert!(first.is_finished());
    assert_eq!(playlist.context().handle().active_voices(), 2);
    assert_relative_eq!(playlist.current_time(), 7.0, epsilon = TIME_EPSILON);

    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.75));
}

/// Playing while already playing restarts from the new position.
#[tokio::test]
async fn test_play_while_playing_restarts() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(10.0, 0.5))]).await;

    let first = playlist.play(None, None).await;
    playlist.context().render_frames(frames(2.0));
    let second = playlist.play(Some(8.0), None).await;

    assert!(first.is_finished());
    assert!(!second.is_finished());
    assert_eq!(playlist.context().handle().active_voices(), 1);
    assert_relative_eq!(playlist.current_time(), 8.0, epsilon = TIME_EPSILON);
}

/// Stop resets position and pause state; the next play starts from the cursor.
#[tokio::test]
async fn test_stop_then_play_starts_from_cursor() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(10.0, 0.5))]).await;

    playlist.seek(2.0, None, None).await.unwrap();
    let playback = playlist.play(None, None).await;
    playlist.context().render_frames(frames(1.0));
    playlist.stop().await.unwrap();

    assert!(playback.is_finished());
    assert_eq!(playlist.play_state(), PlayState::Stopped);
    assert_eq!(playlist.playback_seconds(), 0.0);
    assert_eq!(playlist.context().handle().active_voices(), 0);

    let _ = playlist.play(None, None).await;
    assert_relative_eq!(playlist.current_time(), 2.0, epsilon = TIME_EPSILON);
}

/// A selected segment plays only its window and then finishes.
#[tokio::test]
async fn test_segment_selection_plays_window() {
    let (mut playlist, _) = test_playlist(test_config(), vec![Source::at(0.0, dc(10.0, 0.5))]).await;
    let events = playlist.events();

    playlist.select(2.0, Some(3.0), None).await.unwrap();
    assert!(playlist.is_segment_selection());

    let playback = playlist.play(None, None).await;
    let (left, _) = playlist.context().render_frames(frames(1.5));
    assert!(left[..frames(1.0)].iter().all(|s| *s == 0.5));
    assert!(is_silent(&left[frames(1.0)..]));
    assert!(playback.is_finished());
    playback.finished().await;

    events.try_iter().for_each(drop);
    playlist.on_frame();
    assert!(events.try_iter().any(|e| matches!(e, PlaylistEvent::Finished)));
    assert_eq!(playlist.play_state(), PlayState::Stopped);
}

/// Soloing in non-exclusive mode adds to the solo set; unsoloing restores all.
#[tokio::test]
async fn test_solo_adds_to_set() {
    let (mut playlist, ids) = test_playlist(
        test_config(),
        vec![
            Source::at(0.0, dc(5.0, 0.125)),
            Source::at(0.0, dc(5.0, 0.25)),
            Source::at(0.0, dc(5.0, 0.5)),
        ],
    )
    .await;
    let _ = playlist.play(None, None).await;

    playlist.solo_track(ids[0]).unwrap();
    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.125));

    playlist.solo_track(ids[2]).unwrap();
    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.625));
    assert!(!playlist.should_track_play(ids[1]));

    playlist.solo_track(ids[0]).unwrap();
    playlist.solo_track(ids[2]).unwrap();
    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.875));
}

/// Exclusive solo: soloing another track replaces the solo.
#[tokio::test]
async fn test_exclusive_solo_replaces() {
    let config = PlaylistConfig {
        exclusive_solo: true,
        ..test_config()
    };
    let (mut playlist, ids) = test_playlist(
        config,
        vec![Source::at(0.0, dc(5.0, 0.25)), Source::at(0.0, dc(5.0, 0.5))],
    )
    .await;
    let _ = playlist.play(None, None).await;

    playlist.solo_track(ids[0]).unwrap();
    playlist.solo_track(ids[1]).unwrap();
    assert_eq!(playlist.solo_mute().soloed(), &[ids[1]]);

    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.5));
}

/// While any track is soloed, mutes are ignored; they apply again once the solo set empties.
#[tokio::test]
async fn test_solo_overrides_mute() {
    let (mut playlist, ids) = test_playlist(
        test_config(),
        vec![Source::at(0.0, dc(5.0, 0.25)), Source::at(0.0, dc(5.0, 0.5))],
    )
    .await;
    let _ = playlist.play(None, None).await;

    playlist.mute_track(ids[0]).unwrap();
    playlist.solo_track(ids[0]).unwrap();
    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.25));

    playlist.solo_track(ids[0]).unwrap();
    let (left, _) = playlist.context().render_frames(frames(0.1));
    assert!(left.iter().all(|s| *s == 0.5));
}

/// Duration covers the furthest track end; clear resets it to zero.
#[tokio::test]
async fn test_duration_and_clear() {
    let (mut playlist, _) = test_playlist(
        test_config(),
        vec![Source::at(0.0, dc(10.0, 0.25)), Source::at(5.0, dc(10.0, 0.5))],
    )
    .await;
    assert!(playlist.duration() >= 15.0);

    let _ = playlist.play(None, None).await;
    playlist.clear().await.unwrap();
    assert_eq!(playlist.duration(), 0.0);
    assert!(playlist.tracks().is_empty());
    assert!(!playlist.is_playing());
    assert_eq!(playlist.context().handle().active_voices(), 0);
}

/// Shifting a track moves it on the timeline and grows the duration.
#[tokio::test]
async fn test_shift_track_extends_duration() {
    let (mut playlist, ids) = test_playlist(test_config(), vec![Source::at(0.0, dc(4.0, 0.5))]).await;

    playlist.shift_track(ids[0], 2.5).unwrap();
    assert_relative_eq!(playlist.track(ids[0]).unwrap().start_time(), 2.5);
    assert_relative_eq!(playlist.duration(), 6.5);

    let _ = playlist.play(None, None).await;
    let (left, _) = playlist.context().render_frames(frames(3.0));
    assert!(is_silent(&left[..frames(2.5)]));
    assert!(left[frames(2.5)..].iter().all(|s| *s == 0.5));
}
