// Integration tests for the sound catalogue

mod common;

use common::sound_dir;
use playsounds::{Arbiter, Sound, SoundLibrary, Trigger};

#[test]
fn test_fixed_mapping() {
    let expected = [
        (Sound::Running, "running", Trigger::LeftBumper),
        (Sound::Connect, "connect", Trigger::DpadUp),
        (Sound::Disconnect, "disconnect", Trigger::DpadDown),
        (Sound::Warning, "warning", Trigger::DpadLeft),
        (Sound::Error, "error", Trigger::DpadRight),
    ];
    for (sound, (expected_sound, name, trigger)) in Sound::ALL.iter().zip(expected) {
        assert_eq!(*sound, expected_sound);
        assert_eq!(sound.name(), name);
        assert_eq!(sound.to_string(), name);
        assert_eq!(sound.trigger(), trigger);
        assert_eq!(sound.file_name(), format!("{name}.wav"));
    }
}

#[test]
fn test_default_directory() {
    let library = SoundLibrary::default();
    assert_eq!(
        library.path(Sound::Warning),
        std::path::Path::new("/sdcard/FIRST/blocks/sounds/warning.wav")
    );
}

#[test]
fn test_available_follows_file_system() {
    let dir = sound_dir("library_available", &[Sound::Error, Sound::Connect]);
    let library = SoundLibrary::new(&dir);
    assert_eq!(
        library.available().collect::<Vec<_>>(),
        vec![Sound::Connect, Sound::Error]
    );

    // Files added later are picked up
    std::fs::write(dir.join("running.wav"), b"RIFF").unwrap();
    assert!(library.exists(Sound::Running));

    // A directory with the right name is not a sound file
    std::fs::create_dir_all(dir.join("warning.wav")).unwrap();
    assert!(!library.exists(Sound::Warning));
}

#[test]
fn test_arbiter_keeps_its_library() {
    let dir = sound_dir("library_arbiter", &[Sound::Warning]);
    let arbiter = Arbiter::new(SoundLibrary::new(&dir));

    assert_eq!(arbiter.library().dir(), dir.as_path());
    assert_eq!(
        arbiter.library().available().collect::<Vec<_>>(),
        vec![Sound::Warning]
    );
}
