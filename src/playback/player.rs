//! External player processes

use crate::error::LaunchError;
use clap::ValueEnum;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Known external players and how each is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlayerKind {
    /// mpg321 <file>
    #[default]
    Mpg321,

    /// omxplayer -o alsa <file> (Raspberry Pi)
    Omxplayer,

    /// mpv --no-video --really-quiet <file>
    Mpv,

    /// ffplay -nodisp -autoexit -loglevel quiet <file>
    Ffplay,
}

impl PlayerKind {
    pub fn program(&self) -> &'static str {
        match self {
            PlayerKind::Mpg321 => "mpg321",
            PlayerKind::Omxplayer => "omxplayer",
            PlayerKind::Mpv => "mpv",
            PlayerKind::Ffplay => "ffplay",
        }
    }

    /// Fixed arguments placed before the file path
    pub fn fixed_args(&self) -> &'static [&'static str] {
        match self {
            PlayerKind::Mpg321 => &[],
            PlayerKind::Omxplayer => &["-o", "alsa"],
            PlayerKind::Mpv => &["--no-video", "--really-quiet"],
            PlayerKind::Ffplay => &["-nodisp", "-autoexit", "-loglevel", "quiet"],
        }
    }
}

/// How a player process ended on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    Completed,
    Failed(String),
}

/// A running playback of one file
pub trait PlayerProcess: Send {
    /// Non-blocking exit check
    fn try_wait(&mut self) -> std::io::Result<Option<ExitOutcome>>;

    /// Forcefully stop playback
    fn kill(&mut self) -> std::io::Result<()>;
}

/// Starts player processes - allows swapping the real binary for a test double
pub trait PlayerLauncher: Send + Sync {
    fn launch(&self, path: &Path) -> Result<Box<dyn PlayerProcess>, LaunchError>;
}

/// Launches a real binary as `<program> [fixed args...] <file>`
#[derive(Debug, Clone)]
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
}

impl ExternalPlayer {
    pub fn new(kind: PlayerKind) -> Self {
        Self {
            program: kind.program().to_string(),
            args: kind.fixed_args().iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Arbitrary program, mainly for testing against stand-in binaries
    pub fn custom(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PlayerLauncher for ExternalPlayer {
    fn launch(&self, path: &Path) -> Result<Box<dyn PlayerProcess>, LaunchError> {
        if !path.exists() {
            return Err(LaunchError::MissingFile(path.to_path_buf()));
        }

        log::debug!("Launching {} {:?} {:?}", self.program, self.args, path);

        // Player output is never read
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(Box::new(ChildProcess { child }))
    }
}

struct ChildProcess {
    child: Child,
}

impl PlayerProcess for ChildProcess {
    fn try_wait(&mut self) -> std::io::Result<Option<ExitOutcome>> {
        Ok(self.child.try_wait()?.map(|status| {
            if status.success() {
                ExitOutcome::Completed
            } else {
                ExitOutcome::Failed(format!("player exited with {}", status))
            }
        }))
    }

    fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill()?;
        // Reap so no zombie is left behind
        self.child.wait()?;
        Ok(())
    }
}
