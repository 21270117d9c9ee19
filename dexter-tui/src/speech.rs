//! Host speech backends.

use dexter_core::{SpeechBackend, SpeechError, Voice};
use std::process::Stdio;

/// Speaks through an `espeak-ng` compatible program.
///
/// Voices are listed once at startup with `<program> --voices`. Speaking
/// spawns `<program> -v <language> <text>` and returns without waiting.
pub struct EspeakBackend {
    program: String,
    voices: Vec<Voice>,
}

impl EspeakBackend {
    pub async fn detect(program: &str) -> Self {
        let voices = match tokio::process::Command::new(program)
            .arg("--voices")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                parse_voice_table(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                tracing::warn!(program, status = %output.status, "voice listing failed");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(program, error = %err, "speech program unavailable");
                Vec::new()
            }
        };
        tracing::info!(program, voices = voices.len(), "speech backend ready");
        Self {
            program: program.to_string(),
            voices,
        }
    }
}

impl SpeechBackend for EspeakBackend {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
        let mut command = tokio::process::Command::new(&self.program);
        if let Some(voice) = voice {
            command.arg("-v").arg(&voice.locale);
        }
        command
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| SpeechError::Unavailable {
                reason: format!("{}: {}", self.program, e),
            })
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File          Other Languages
///  5  cs              --/M      Czech              zlw/cs
///  2  en-us           --/M      English_(America)  gmw/en-US     (en 3)
/// ```
pub fn parse_voice_table(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [_priority, language, _age_gender, name, ..] => {
                    Some(Voice::new(*name, *language))
                }
                _ => None,
            }
        })
        .collect()
}

/// Backend used when speech is disabled in config.
pub struct SilentBackend;

impl SpeechBackend for SilentBackend {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&self, text: &str, _voice: Option<&Voice>) -> Result<(), SpeechError> {
        tracing::debug!(text, "speech disabled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexter_core::{select_voice, Locale};

    const TABLE: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 5  cs              --/M      Czech              zlw/cs
 2  en-gb           --/M      English_(Great_Britain) gmw/en
 2  en-us           --/M      English_(America)  gmw/en-US            (en 3)
";

    #[test]
    fn parses_voice_rows() {
        let voices = parse_voice_table(TABLE);
        assert_eq!(voices.len(), 4);
        assert_eq!(voices[1], Voice::new("Czech", "cs"));
        assert_eq!(voices[3], Voice::new("English_(America)", "en-us"));
    }

    #[test]
    fn parsed_voices_match_locales() {
        let voices = parse_voice_table(TABLE);
        assert_eq!(select_voice(&voices, Locale::English).unwrap().locale, "en-us");
        assert_eq!(select_voice(&voices, Locale::Czech).unwrap().locale, "cs");
    }

    #[tokio::test]
    async fn missing_program_detects_no_voices() {
        let backend = EspeakBackend::detect("dexter-no-such-speech-program").await;
        assert!(backend.voices().is_empty());
        assert!(matches!(
            backend.speak("pikachu", None),
            Err(SpeechError::Unavailable { .. })
        ));
    }

    #[test]
    fn garbage_yields_no_voices() {
        assert!(parse_voice_table("command not found").is_empty());
        assert!(parse_voice_table("").is_empty());
    }
}
