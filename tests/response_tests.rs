use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use tokio_test::assert_ok;

use interview_ai::audio::{self, SpeechError};
use interview_ai::response::{
  self, AnalysisOutcome, JobAnalysis, ReviewItem, StructuredError
};

fn with_text(text: &str) -> serde_json::Value
{   json!({
      "candidates": [ { "content": { "parts": [ { "text": text } ] } } ]
    })
}

#[test]
fn test_text_round_trip()
{   let body = json!({
      "candidates": [ { "content": { "parts": [ { "text": "Q1?" } ] } } ]
    });
    assert_eq!(response::text(&body), Some("Q1?"));
    assert_eq!(
      response::text_or(Some(&body), response::FALLBACK_TEXT),
      "Q1?"
    );
}

#[test]
fn test_missing_text_uses_fallback()
{   let shapes = [
      json!({}),
      json!({ "candidates": [] }),
      json!({ "candidates": [ { "content": { "parts": [] } } ] }),
      json!({ "candidates": [ { "content": { "parts": [ { "text": "" } ] } } ] }),
      json!({ "candidates": [ { "content": { "parts": [ { "text": 7 } ] } } ] }),
    ];
    for body in &shapes
    {   assert_eq!(
          response::text_or(Some(body), response::FALLBACK_TEXT),
          "Failed to get a response.",
          "body {}", body
        );
    }
    assert_eq!(
      response::text_or(None, response::FALLBACK_FOLLOW_UP),
      "I apologize, I could not generate a response. Please try again."
    );
}

#[test]
fn test_structured_decode()
{   let body = with_text(
      r#"{"skills":["Rust","SQL"],"questions":["Why Rust?"]}"#
    );
    let analysis: JobAnalysis = response::structured(&body).unwrap();
    assert_eq!(analysis.skills, vec!["Rust", "SQL"]);
    assert_eq!(analysis.questions, vec!["Why Rust?"]);
}

#[test]
fn test_structured_errors_are_values()
{   let missing = response::structured::<JobAnalysis>(&json!({}));
    assert_eq!(missing, Err(StructuredError::MissingText));

    let malformed
      = response::structured::<JobAnalysis>(&with_text("not json {"));
    assert!(matches!(malformed, Err(StructuredError::Malformed(_))));

    let wrong_shape
      = response::structured::<Vec<ReviewItem>>(&with_text("{\"a\":1}"));
    assert!(matches!(wrong_shape, Err(StructuredError::Malformed(_))));
}

#[test]
fn test_resolve_analysis()
{   let ready = response::resolve_analysis(Ok(JobAnalysis
    {   skills: vec!["Knife skills".to_string()]
      , questions: vec![]
    }));
    assert!(matches!(ready, AnalysisOutcome::Ready(_)));

    let failed = response::resolve_analysis(
      Err(StructuredError::Malformed("eof".to_string()))
    );
    assert_eq!(
      failed,
      AnalysisOutcome::Failed
      {   message: "Failed to generate analysis. \
                    The API response was not valid JSON.".to_string()
      }
    );
}

#[test]
fn test_review_malformed_gives_error_placeholder()
{   let parsed
      = response::structured::<Vec<ReviewItem>>(&with_text("[{oops"));
    let items = response::resolve_review(parsed);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].evaluation, "Error");
    assert_eq!(items[0].question, "Review Generation Failed");
    assert_eq!(items[0], ReviewItem::malformed());
}

#[test]
fn test_review_empty_array_gives_insufficient_detail()
{   let parsed = response::review_items(&with_text("[]"));
    let items = response::resolve_review(parsed);

    assert_eq!(items, vec![ReviewItem::insufficient_detail()]);
    assert_eq!(items[0].evaluation, "Cannot review");
}

#[test]
fn test_review_first_item_without_evaluation()
{   let text = json!([
      { "question": "Why here?", "yourAnswer": "idk" },
      { "question": "Q2", "yourAnswer": "A2", "evaluation": "Good" }
    ]).to_string();
    let parsed = response::review_items(&with_text(&text));
    let items = response::resolve_review(parsed);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].question, "Why here?");
    assert_eq!(items[0].your_answer, "idk");
    assert_eq!(items[0].evaluation, "Needs more detail");
}

#[test]
fn test_review_null_fields_read_as_empty()
{   let text = r#"[{"question":"Q","yourAnswer":"A","evaluation":null}]"#;
    let items = response::resolve_review(
      response::review_items(&with_text(text))
    );

    assert_eq!(items, vec![ReviewItem::needs_more_detail("Q", "A")]);

    let text = r#"[{"question":null,"yourAnswer":"A","evaluation":"Good",
      "explanation":null,"suggestedAnswer":null}]"#;
    let items = assert_ok!(response::review_items(&with_text(text)));
    assert_eq!(items[0].question, "");
    assert_eq!(items[0].evaluation, "Good");
    assert_eq!(items[0].suggested_answer, "");
}

#[test]
fn test_review_non_array_json_gives_insufficient_detail()
{   for text in [r#"{"question":"Q"}"#, "null", "\"fine\"", "42"]
    {   let parsed = response::review_items(&with_text(text));
        assert_eq!(parsed, Ok(vec![]), "text {}", text);
        assert_eq!(
          response::resolve_review(parsed),
          vec![ReviewItem::insufficient_detail()]
        );
    }
}

#[test]
fn test_review_non_object_entries_are_blank()
{   let items = assert_ok!(
      response::review_items(&with_text(r#"["Q1", null]"#))
    );
    assert_eq!(items, vec![ReviewItem::default(), ReviewItem::default()]);

    assert_eq!(
      response::review_items(&json!({})),
      Err(StructuredError::MissingText)
    );
}

#[test]
fn test_review_passes_complete_items_through()
{   let text = json!([
      {
        "question": "Tell me about a rush.",
        "yourAnswer": "I prioritised tickets.",
        "evaluation": "Good answer",
        "explanation": "Clear example.",
        "suggestedAnswer": "Add numbers."
      },
      { "question": "Q2", "yourAnswer": "A2", "evaluation": "Weak" }
    ]).to_string();
    let parsed = response::review_items(&with_text(&text));
    let items = response::resolve_review(parsed);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].suggested_answer, "Add numbers.");
    assert_eq!(items[1].explanation, "");
}

#[test]
fn test_sample_rate_from_mime()
{   assert_eq!(
      audio::sample_rate_from_mime("audio/L16;codec=pcm;rate=24000"),
      24000
    );
    assert_eq!(audio::sample_rate_from_mime("audio/L16; rate=8000"), 8000);
    assert_eq!(audio::sample_rate_from_mime("audio/L16"), 16000);
    assert_eq!(audio::sample_rate_from_mime("audio/L16;rate=x"), 16000);
}

#[test]
fn test_pcm_to_wav_header()
{   let pcm = [0x01u8, 0x00, 0xff, 0x7f, 0x09];
    let wav = audio::pcm_to_wav(&pcm, 24000);

    assert_eq!(wav.len(), 44 + 4);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 4);
    assert_eq!(&wav[8..16], b"WAVEfmt ");
    assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 24000);
    assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 48000);
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 4);
    assert_eq!(&wav[44..], &pcm[..4]);
}

#[test]
fn test_decode_speech()
{   let pcm: Vec<u8> = (0u8..8).collect();
    let body = json!({
      "candidates": [ { "content": { "parts": [ {
        "inlineData": {
          "mimeType": "audio/L16;codec=pcm;rate=24000",
          "data": STANDARD.encode(&pcm)
        }
      } ] } } ]
    });

    let clip = audio::decode_speech(&body).unwrap();
    assert_eq!(clip.sample_rate, 24000);
    assert_eq!(clip.wav.len(), 44 + 8);
    assert_eq!(&clip.wav[44..], &pcm[..]);
}

#[test]
fn test_decode_speech_rejects_non_audio()
{   let text_part = with_text("hello");
    assert!(matches!(
      audio::decode_speech(&text_part),
      Err(SpeechError::InvalidAudio(_))
    ));

    let image = json!({
      "candidates": [ { "content": { "parts": [ {
        "inlineData": { "mimeType": "image/png", "data": "AAAA" }
      } ] } } ]
    });
    assert!(response::inline_audio(&image).is_none());

    let bad_base64 = json!({
      "candidates": [ { "content": { "parts": [ {
        "inlineData": { "mimeType": "audio/L16", "data": "***" }
      } ] } } ]
    });
    assert!(matches!(
      audio::decode_speech(&bad_base64),
      Err(SpeechError::InvalidAudio(_))
    ));
}
