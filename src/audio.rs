//! PCM16 speech output to WAV

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use log::{debug, error};

pub const DEFAULT_SAMPLE_RATE: u32 = 16000;
const WAV_HEADER_LEN: usize = 44;

/// Playable speech clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio
{   pub sample_rate: u32
  , /// RIFF/WAVE bytes, mono 16-bit PCM
    pub wav: Vec<u8>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError
{   /// The call itself failed
    Request(crate::error::Error)
  , /// Response carried no usable audio part
    InvalidAudio(String)
}

impl fmt::Display for SpeechError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   SpeechError::Request(e) => write!(f, "{}", e)
          , SpeechError::InvalidAudio(msg) => {
              write!(f, "Invalid audio response: {}", msg)
            }
        }
    }
}

impl std::error::Error for SpeechError {}

impl From<crate::error::Error> for SpeechError
{   fn from(e: crate::error::Error) -> Self
    {   SpeechError::Request(e)
    }
}

/// `rate=N` parameter of a MIME type such as
/// `audio/L16;codec=pcm;rate=24000`
pub fn sample_rate_from_mime(mime_type: &str) -> u32
{   mime_type
      .split(';')
      .filter_map(|param| param.trim().strip_prefix("rate="))
      .find_map(|rate| rate.trim().parse::<u32>().ok())
      .unwrap_or(DEFAULT_SAMPLE_RATE)
}

/// Wrap little-endian PCM16 samples in a WAV header.
/// A trailing odd byte is dropped.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8>
{   let data_len = (pcm.len() / 2) * 2;
    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + data_len);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    // PCM, mono
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    // byte rate, block align, bits per sample
    wav.extend_from_slice(&sample_rate.saturating_mul(2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_len as u32).to_le_bytes());
    wav.extend_from_slice(&pcm[..data_len]);

    wav
}

/// Decode a speech response body into a WAV clip
pub fn decode_speech(body: &serde_json::Value)
  -> Result<SpeechAudio, SpeechError>
{   let inline = crate::response::inline_audio(body)
      .ok_or_else(|| {
        error!("Invalid audio response from API");
        SpeechError::InvalidAudio("no audio part".to_string())
      })?;

    let pcm = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
      error!("Audio data was not base64: {}", e);
      SpeechError::InvalidAudio(e.to_string())
    })?;

    let sample_rate = sample_rate_from_mime(&inline.mime_type);
    debug!(
      "Decoded {} bytes of PCM at {}Hz",
      pcm.len(), sample_rate
    );

    Ok(SpeechAudio
    {   sample_rate
      , wav: pcm_to_wav(&pcm, sample_rate)
    })
}
