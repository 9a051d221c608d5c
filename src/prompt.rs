//! Payload builders for the interview practice flows

use serde_json::json;

use crate::request::{Content, GenerateRequest, GenerationConfig};
use crate::{ChatMessage, Sender};

pub const SPEECH_VOICE: &str = "Charon";

/// First question of an interview for `role`
pub fn start_interview(role: &str) -> GenerateRequest
{   let prompt = format!(
      "You are an interviewer for a {} position. Your role is to ask \
       one question at a time to the job candidate. Do not provide \
       answers, additional text, or context. Your only output should \
       be the question itself. Start the interview by asking the first \
       question.",
      role
    );
    GenerateRequest
    {   contents: vec![Content::user(prompt)]
      , generation_config: GenerationConfig::plain_text()
    }
}

/// Evaluate `answer` and ask the next question, given the chat so far
pub fn follow_up(
  role: &str
, history: &[ChatMessage]
, answer: &str
) -> GenerateRequest
{   let mut contents: Vec<Content> = history
      .iter()
      .map(|m| match m.sender
      {   Sender::Ai => Content::model(m.text.clone())
        , Sender::User => Content::user(m.text.clone())
      })
      .collect();
    contents.push(Content::user(answer));

    let evaluation = format!(
      "The candidate just said: \"{}\". Please provide a brief, \
       professional evaluation of their answer (e.g., \"Good answer, \
       you provided a clear example.\"). Then, ask the next question \
       for a {} interview. The entire response must be concise and \
       conversational. Do not provide your own answers or any other \
       text, just the evaluation and the next question.",
      answer, role
    );
    contents.push(Content::user(evaluation));

    GenerateRequest
    {   contents
      , generation_config: GenerationConfig::plain_text()
    }
}

/// Extract key skills and sample questions from a job description
pub fn analyze_job_description(description: &str) -> GenerateRequest
{   let prompt = format!(
      "Analyze the following job description. Extract the most \
       important key skills required for the role, and then generate 5 \
       sample interview questions that a candidate would likely be \
       asked based on this description. Your response must be a JSON \
       object with two keys: \"skills\" (an array of strings) and \
       \"questions\" (an array of strings).\n\n\
       Job Description:\n{}\n\n\
       Please provide the JSON object only.",
      description
    );
    let schema = json!({
      "type": "OBJECT",
      "properties": {
        "skills": { "type": "ARRAY", "items": { "type": "STRING" } },
        "questions": { "type": "ARRAY", "items": { "type": "STRING" } }
      },
      "propertyOrdering": ["skills", "questions"]
    });
    GenerateRequest
    {   contents: vec![Content::user(prompt)]
      , generation_config: GenerationConfig::json(schema)
    }
}

/// Question/Answer transcript of a chat
pub fn transcript(history: &[ChatMessage]) -> String
{   history
      .iter()
      .map(|m| match m.sender
      {   Sender::Ai => format!("Question: {}", m.text)
        , Sender::User => format!("Answer: {}", m.text)
      })
      .collect::<Vec<_>>()
      .join("\n")
}

/// Per answer review of a finished interview
pub fn review(role: &str, history: &[ChatMessage]) -> GenerateRequest
{   let prompt = format!(
      "You are a professional career coach. Your task is to review the \
       following interview transcript for a {} position. For each \
       question and answer pair, provide an evaluation, a brief \
       explanation for your feedback, and a suggested, more effective \
       answer. Your response MUST be a JSON array of objects. Each \
       object MUST have the keys \"question\", \"yourAnswer\", \
       \"evaluation\", \"explanation\", and \"suggestedAnswer\". DO NOT \
       include any other text, context, or conversational remarks.\n\n\
       If an answer is too brief to be reviewed, your \"evaluation\" \
       should be \"Needs more detail\", your \"explanation\" should \
       state \"Your answer was too brief. Please provide more context \
       and specific examples.\", and your \"suggestedAnswer\" should be \
       \"Try again by providing a more comprehensive response to the \
       question.\"\n\n\
       Interview Transcript:\n{}\n\n\
       JSON array only:",
      role,
      transcript(history)
    );
    let schema = json!({
      "type": "ARRAY",
      "items": {
        "type": "OBJECT",
        "properties": {
          "question": { "type": "STRING" },
          "yourAnswer": { "type": "STRING" },
          "evaluation": { "type": "STRING" },
          "explanation": { "type": "STRING" },
          "suggestedAnswer": { "type": "STRING" }
        }
      }
    });
    GenerateRequest
    {   contents: vec![Content::user(prompt)]
      , generation_config: GenerationConfig::json(schema)
    }
}

/// Read `text` aloud
pub fn speak(text: &str) -> GenerateRequest
{   GenerateRequest
    {   contents: vec![Content::bare(format!(
          "Say in an informative tone: {}",
          text
        ))]
      , generation_config: GenerationConfig::audio(SPEECH_VOICE)
    }
}
