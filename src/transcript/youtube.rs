//! YouTube transcript source.
//!
//! Reads the player response embedded in the watch page, picks a caption
//! track for the requested language and downloads it in `json3` format.

use super::models::{Transcript, TranscriptSegment, VideoMetadata};
use super::{TranscriptLanguage, TranscriptSource};
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Transcript source backed by YouTube caption tracks.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    video_id_regex: Regex,
}

impl YoutubeTranscriptSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            video_id_regex: video_id_regex(),
        })
    }

    /// Extract video ID from a YouTube URL or bare ID.
    pub fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::COOKIE, "CONSENT=YES+1")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptSegment>> {
        let url = json3_url(&track.base_url)?;
        debug!("Downloading caption track {}", track.language_code);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&body)
    }
}

/// Matches watch/short/embed URLs and bare 11-character IDs.
fn video_id_regex() -> Regex {
    Regex::new(
        r"(?x)
        (?:
            (?:https?://)?
            (?:www\.|m\.)?
            (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
            ([a-zA-Z0-9_-]{11})
        )
        |
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("video id pattern is valid")
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self, language), fields(language = %language))]
    async fn fetch(&self, video_id: &str, language: TranscriptLanguage) -> Result<Transcript> {
        let id = self.extract_video_id(video_id).ok_or_else(|| {
            RecapError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", video_id))
        })?;

        info!("Fetching watch page for {}", id);
        let html = self.fetch_watch_page(&id).await?;

        let player = PlayerResponse::from_html(&html, &id)?;
        let metadata = player.metadata(&id);
        let tracks = player.caption_tracks(&id)?;

        let track = select_track(&tracks, language).ok_or_else(|| {
            let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            RecapError::TranscriptNotAvailable(format!(
                "no '{}' transcript for video {} (available: {})",
                language,
                id,
                available.join(", ")
            ))
        })?;

        let segments = self.fetch_track(track).await?;
        info!("Fetched {} transcript segments", segments.len());

        Ok(Transcript::new(metadata, &track.language_code, segments))
    }
}

/// The subset of `ytInitialPlayerResponse` the fetcher reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    video_details: Option<VideoDetails>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoDetails {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// `"asr"` for auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

impl PlayerResponse {
    fn from_html(html: &str, video_id: &str) -> Result<Self> {
        if html.contains("class=\"g-recaptcha\"") {
            return Err(RecapError::VideoUnavailable(format!(
                "YouTube is asking for a captcha while loading {}",
                video_id
            )));
        }

        let start = html.find(PLAYER_RESPONSE_MARKER).ok_or_else(|| {
            RecapError::VideoUnavailable(format!("no player response found for {}", video_id))
        })?;
        let rest = &html[start + PLAYER_RESPONSE_MARKER.len()..];
        let brace = rest.find('{').ok_or_else(|| {
            RecapError::TranscriptParse("player response has no JSON body".to_string())
        })?;

        // The object is followed by arbitrary script, so only the first value is read.
        let mut stream =
            serde_json::Deserializer::from_str(&rest[brace..]).into_iter::<PlayerResponse>();
        match stream.next() {
            Some(Ok(player)) => Ok(player),
            Some(Err(e)) => Err(RecapError::TranscriptParse(format!(
                "invalid player response: {}",
                e
            ))),
            None => Err(RecapError::TranscriptParse("empty player response".to_string())),
        }
    }

    fn metadata(&self, video_id: &str) -> VideoMetadata {
        let mut metadata = VideoMetadata::new(video_id);
        if let Some(details) = &self.video_details {
            metadata.title = details.title.clone();
            metadata.author = details.author.clone();
        }
        metadata
    }

    fn caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        if let Some(status) = &self.playability_status {
            if status.status != "OK" {
                let reason = status.reason.clone().unwrap_or_else(|| status.status.clone());
                return Err(RecapError::VideoUnavailable(format!("{}: {}", video_id, reason)));
            }
        }

        let tracks = self
            .captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
            .map(|r| r.caption_tracks.clone())
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(RecapError::TranscriptDisabled(video_id.to_string()));
        }

        Ok(tracks)
    }
}

/// Pick a caption track: exact language first, then the base language,
/// manual tracks before auto-generated ones.
fn select_track(tracks: &[CaptionTrack], language: TranscriptLanguage) -> Option<&CaptionTrack> {
    let code = language.code().to_lowercase();
    let base = code.split('-').next().unwrap_or(&code).to_string();

    let exact = |t: &&CaptionTrack| t.language_code.to_lowercase() == code;
    let same_base = |t: &&CaptionTrack| {
        let track_code = t.language_code.to_lowercase();
        track_code.split('-').next() == Some(base.as_str())
    };

    tracks
        .iter()
        .filter(exact)
        .find(|t| !t.is_generated())
        .or_else(|| tracks.iter().find(exact))
        .or_else(|| tracks.iter().filter(same_base).find(|t| !t.is_generated()))
        .or_else(|| tracks.iter().find(same_base))
}

/// Force the `json3` format on a caption track URL.
fn json3_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| RecapError::TranscriptParse(format!("invalid caption URL: {}", e)))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("fmt", "json3");

    Ok(url)
}

#[derive(Debug, Deserialize)]
struct Json3Track {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Convert a `json3` caption document into segments, skipping empty events.
fn parse_json3(body: &str) -> Result<Vec<TranscriptSegment>> {
    if body.trim().is_empty() {
        return Err(RecapError::TranscriptParse(
            "caption track returned an empty body".to_string(),
        ));
    }

    let track: Json3Track = serde_json::from_str(body)
        .map_err(|e| RecapError::TranscriptParse(format!("invalid caption track: {}", e)))?;

    let segments = track
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = raw.replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}
