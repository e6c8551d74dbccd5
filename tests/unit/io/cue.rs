use super::*;

#[test]
fn recording_player_shares_history_across_clones() {
    let recorder = RecordingCuePlayer::new();
    let mut player = recorder.clone();
    player.play(&CueId::new("star")).unwrap();
    player.play(&CueId::new("star")).unwrap();
    player.play(&CueId::new("dog")).unwrap();
    assert_eq!(
        recorder.played(),
        vec![CueId::new("star"), CueId::new("star"), CueId::new("dog")]
    );
}

#[test]
fn missing_cue_fails_without_recording() {
    let mut player = RecordingCuePlayer::new().with_missing(CueId::new("rainbow"));
    let err = player.play(&CueId::new("rainbow")).unwrap_err();
    assert!(err.to_string().contains("rainbow"));
    assert!(player.played().is_empty());
}

#[test]
fn log_player_never_fails() {
    let mut player = LogCuePlayer;
    assert!(player.play(&CueId::new("fish")).is_ok());
}
