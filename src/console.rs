//! Line-oriented terminal front-end
//!
//! Reads commands from any `BufRead` and prints results; playback state
//! arrives separately through [`ConsoleObserver`].

use crate::control::{Jukebox, Selection};
use crate::status::{PlaybackState, StatusObserver};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Mutex;

const HELP: &str = "\
Commands:
  search PREFIX          find artists, albums and tracks (alias: s)
  play N                 queue result N of the last search (alias: p)
  albums ARTIST          list an artist's albums
  tracks ARTIST / ALBUM  list an album's tracks
  queue                  show what is playing and coming up
  skip                   skip the current track
  clear                  drop every track not yet started
  help                   show this help
  quit                   exit";

/// Prints every playback state to a writer
pub struct ConsoleObserver<W: Write + Send + 'static> {
    out: Mutex<W>,
}

impl<W: Write + Send + 'static> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send + 'static> StatusObserver for ConsoleObserver<W> {
    fn on_state(&self, state: &PlaybackState) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{}", state.status_message)?;
        if !state.queue.is_empty() {
            writeln!(out, "Coming up: {} track(s)", state.queue.len())?;
        }
        out.flush()?;
        Ok(())
    }
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Play(usize),
    Albums(String),
    Tracks { artist: String, album: String },
    Queue,
    Skip,
    Clear,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Ok(ShellCommand::Empty),
            "search" | "s" => Ok(ShellCommand::Search(rest.to_string())),
            "play" | "p" => rest
                .parse::<usize>()
                .map(ShellCommand::Play)
                .map_err(|_| format!("not a result number: {:?}", rest)),
            "albums" if !rest.is_empty() => Ok(ShellCommand::Albums(rest.to_string())),
            "tracks" => match rest.split_once(" / ") {
                Some((artist, album)) => Ok(ShellCommand::Tracks {
                    artist: artist.trim().to_string(),
                    album: album.trim().to_string(),
                }),
                None => Err("usage: tracks ARTIST / ALBUM".to_string()),
            },
            "queue" => Ok(ShellCommand::Queue),
            "skip" => Ok(ShellCommand::Skip),
            "clear" => Ok(ShellCommand::Clear),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// Run commands until `quit` or end of input
pub fn run_shell<R: BufRead, W: Write>(jukebox: &Jukebox, input: R, mut out: W) -> Result<()> {
    let mut last_results: Vec<(String, Selection)> = Vec::new();
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let command = match ShellCommand::parse(&line?) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Search(prefix) => {
                last_results = jukebox.search(&prefix).selections();
                if last_results.is_empty() {
                    writeln!(out, "No matches for {:?}", prefix)?;
                }
                for (i, (label, _)) in last_results.iter().enumerate() {
                    writeln!(out, "{:>4}  {}", i + 1, label)?;
                }
            }
            ShellCommand::Play(n) => match n.checked_sub(1).and_then(|i| last_results.get(i)) {
                Some((label, selection)) => {
                    let queued = jukebox.enqueue(selection);
                    writeln!(out, "Queued {} track(s) from {}", queued, label)?;
                }
                None => writeln!(out, "No result #{}", n)?,
            },
            ShellCommand::Albums(artist) => {
                let albums = jukebox.list_albums_for_artist(&artist);
                if albums.is_empty() {
                    writeln!(out, "No albums for {:?}", artist)?;
                }
                for album in albums {
                    writeln!(out, "  {} ({} tracks)", album.title, album.track_count())?;
                }
            }
            ShellCommand::Tracks { artist, album } => {
                let tracks = jukebox.list_tracks_for_album(&album, &artist);
                if tracks.is_empty() {
                    writeln!(out, "No tracks for {} / {}", artist, album)?;
                }
                for track in tracks {
                    writeln!(out, "  {}", track.title)?;
                }
            }
            ShellCommand::Queue => {
                let state = jukebox.engine().state();
                writeln!(out, "{}", state.status_message)?;
                writeln!(out, "Coming up:")?;
                for track in &state.queue {
                    writeln!(out, "  {}", track)?;
                }
            }
            ShellCommand::Skip => {
                if !jukebox.skip() {
                    writeln!(out, "Nothing is playing")?;
                }
            }
            ShellCommand::Clear => jukebox.clear_queue(),
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => break,
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::parse("search bo"),
            Ok(ShellCommand::Search("bo".to_string()))
        );
        assert_eq!(ShellCommand::parse("s"), Ok(ShellCommand::Search(String::new())));
        assert_eq!(ShellCommand::parse("p 3"), Ok(ShellCommand::Play(3)));
        assert_eq!(
            ShellCommand::parse("tracks Low / Things We Lost in the Fire"),
            Ok(ShellCommand::Tracks {
                artist: "Low".to_string(),
                album: "Things We Lost in the Fire".to_string(),
            })
        );
        assert_eq!(ShellCommand::parse("   "), Ok(ShellCommand::Empty));
        assert_eq!(ShellCommand::parse("quit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("play x").is_err());
        assert!(ShellCommand::parse("albums").is_err());
        assert!(ShellCommand::parse("tracks Low").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }

    #[test]
    fn test_console_observer_output() {
        let observer = ConsoleObserver::new(Vec::new());
        observer.on_state(&PlaybackState::idle()).unwrap();

        let out = observer.out.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Waiting for something to play.\n");
    }
}
