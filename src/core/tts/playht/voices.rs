//! Voice name mapping for the `PlayDialog-turbo` engine.
//!
//! The turbo engine addresses voices by short `<Name>-PlayAI` identifiers
//! instead of the S3 manifest URLs the other engines accept.

/// Voices served by the `PlayDialog-turbo` engine.
pub const PLAY_DIALOG_TURBO_VOICES: &[&str] = &[
    "Angelo-PlayAI",
    "Arsenio-PlayAI",
    "Atlas-PlayAI",
    "Basil-PlayAI",
    "Briggs-PlayAI",
    "Calum-PlayAI",
    "Celeste-PlayAI",
    "Cheyenne-PlayAI",
    "Chip-PlayAI",
    "Cillian-PlayAI",
    "Deedee-PlayAI",
    "Fritz-PlayAI",
    "Gail-PlayAI",
    "Indigo-PlayAI",
    "Mamaw-PlayAI",
    "Mason-PlayAI",
    "Mikail-PlayAI",
    "Mitch-PlayAI",
    "Quinn-PlayAI",
    "Thunder-PlayAI",
];

const TURBO_SUFFIX: &str = "-PlayAI";

/// Maps a caller-facing voice identifier to the turbo engine's voice id.
///
/// Accepts the canonical id (`Atlas-PlayAI`) or the bare name (`atlas`) in
/// any case. Identifiers that match no turbo voice are passed through
/// unchanged so the API can reject them with a proper error.
///
/// ```rust
/// use playht_stream::core::tts::playht::map_play_dialog_turbo_voice;
///
/// assert_eq!(map_play_dialog_turbo_voice(Some("atlas")).as_deref(), Some("Atlas-PlayAI"));
/// assert_eq!(map_play_dialog_turbo_voice(None), None);
/// ```
pub fn map_play_dialog_turbo_voice(voice_id: Option<&str>) -> Option<String> {
    let voice_id = voice_id?;
    let trimmed = voice_id.trim();

    let name = strip_suffix_ignore_case(trimmed, TURBO_SUFFIX).unwrap_or(trimmed);

    PLAY_DIALOG_TURBO_VOICES
        .iter()
        .find(|canonical| {
            canonical
                .strip_suffix(TURBO_SUFFIX)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .map(|canonical| (*canonical).to_string())
        .or_else(|| Some(voice_id.to_string()))
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ids_map_to_themselves() {
        for voice in PLAY_DIALOG_TURBO_VOICES {
            assert_eq!(map_play_dialog_turbo_voice(Some(voice)).as_deref(), Some(*voice));
        }
    }

    #[test]
    fn test_bare_names_are_case_insensitive() {
        assert_eq!(
            map_play_dialog_turbo_voice(Some("CELESTE")).as_deref(),
            Some("Celeste-PlayAI")
        );
        assert_eq!(
            map_play_dialog_turbo_voice(Some("quinn-playai")).as_deref(),
            Some("Quinn-PlayAI")
        );
    }

    #[test]
    fn test_unknown_voice_passes_through() {
        let manifest = "s3://voice-cloning-zero-shot/abc/original/manifest.json";
        assert_eq!(
            map_play_dialog_turbo_voice(Some(manifest)).as_deref(),
            Some(manifest)
        );
    }

    #[test]
    fn test_missing_voice_stays_missing() {
        assert_eq!(map_play_dialog_turbo_voice(None), None);
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert_eq!(
            map_play_dialog_turbo_voice(Some("ééééééé")).as_deref(),
            Some("ééééééé")
        );
    }
}
