//! Picks the image generator for a run: live, recording, or replaying.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::ImageError;
use crate::ports::ImageGenerator;

/// How the generator port is backed, chosen from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Call the Gemini API.
    Live,
    /// Call the Gemini API and write a cassette (`STYLESHOT_REC=1|true`).
    Recording,
    /// Serve calls from a cassette (`STYLESHOT_REPLAY=<path>`).
    Replaying(PathBuf),
}

impl RunMode {
    /// Resolve the mode from `STYLESHOT_REPLAY` / `STYLESHOT_REC`; replay wins.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("STYLESHOT_REPLAY").ok().as_deref(),
            std::env::var("STYLESHOT_REC").ok().as_deref(),
        )
    }

    fn from_vars(replay: Option<&str>, rec: Option<&str>) -> Self {
        match (replay, rec) {
            (Some(path), _) if !path.is_empty() => Self::Replaying(PathBuf::from(path)),
            (_, Some("1" | "true")) => Self::Recording,
            _ => Self::Live,
        }
    }
}

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette to disk.
    ///
    /// The context that produced this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Build the context for `mode`, returning a session when recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing (live, recording) or the
    /// cassette cannot be loaded (replaying).
    pub fn for_mode(
        mode: &RunMode,
        config: &Config,
    ) -> Result<(Self, Option<RecordingSession>), ImageError> {
        match mode {
            RunMode::Live => Ok((Self::live(config)?, None)),
            RunMode::Recording => {
                let (ctx, session) = Self::recording(config)?;
                Ok((ctx, Some(session)))
            }
            RunMode::Replaying(path) => Ok((Self::replaying(path)?, None)),
        }
    }

    /// Create a live context backed by the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config) -> Result<Self, ImageError> {
        let key = config.gemini_key().ok_or(ImageError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })?;
        Ok(Self { generator: Box::new(GeminiGenerator::new(key)) })
    }

    /// Wrap a live context so every settled call lands in a cassette under
    /// `.styleshot/cassettes/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), ImageError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".styleshot/cassettes")
            .join(&timestamp)
            .join("image_generator.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_generator"),
            commit_hash(),
        )));

        let generator = RecordingImageGenerator::new(live_ctx.generator, Arc::clone(&recorder));
        Ok((Self { generator: Box::new(generator) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self { generator: Box::new(ReplayingImageGenerator::new(replayer)) })
    }
}

/// Current git commit hash, or "unknown" if unavailable.
fn commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
