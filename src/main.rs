use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use log::{debug, info};

use interview_ai::response::AnalysisOutcome;
use interview_ai::roles::JOB_ROLES;
use interview_ai::{ClientConfig, GenerativeClient, InterviewSession};

/// Console stand-in for the interview page.
/// Blank line skips analysis, `/end` finishes the interview.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   env_logger::init();

    let config = ClientConfig::from_env();
    debug!("Using chat model {}", config.chat_model);
    let client = GenerativeClient::new(config)?;
    let mut session = InterviewSession::new(client);

    let token = session.cancellation_token();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok()
      {   info!("Interrupted, cancelling in-flight call");
          token.cancel();
      }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Paste a job description to analyze (blank to skip):");
    if let Some(desc) = lines.next_line().await?
    {   if !desc.trim().is_empty()
        {   match session.analyze_job_description(&desc).await?
            {   AnalysisOutcome::Ready(analysis) => {
                  println!("\nKey skills:");
                  for skill in &analysis.skills
                  {   println!("  - {}", skill);
                  }
                  println!("\nSample questions:");
                  for q in &analysis.questions
                  {   println!("  - {}", q);
                  }
                }
              , AnalysisOutcome::Failed { message } => {
                  println!("{}", message);
                }
            }
            report_error(&session);
        }
    }

    println!("\nPick a role:");
    for (i, role) in JOB_ROLES.iter().enumerate()
    {   println!("{:>3}. {} - {}", i + 1, role.name, role.description);
    }
    let role = match pick_role(&mut lines).await?
    {   Some(role) => role
      , None => return Ok(())
    };

    let question = session.start_interview(role).await?;
    println!("\nAI: {}", question);
    report_error(&session);

    while let Some(line) = lines.next_line().await?
    {   if line.trim() == "/end"
        {   break;
        }
        if let Some(reply) = session.send_answer(&line).await?
        {   println!("\nAI: {}", reply);
            report_error(&session);
        }
    }

    println!("\nInterview review\n");
    for item in session.end_interview().await?
    {   println!("Q: {}", item.question);
        println!("A: {}", item.your_answer);
        println!("Evaluation: {}", item.evaluation);
        println!("Why: {}", item.explanation);
        println!("Try: {}\n", item.suggested_answer);
    }
    report_error(&session);

    Ok(())
}

async fn pick_role(lines: &mut Lines<BufReader<Stdin>>)
  -> std::io::Result<Option<&'static str>>
{   while let Some(line) = lines.next_line().await?
    {   let pick = line.trim();
        if let Ok(n) = pick.parse::<usize>()
        {   if let Some(role) = n.checked_sub(1).and_then(|i| JOB_ROLES.get(i))
            {   return Ok(Some(role.name));
            }
        }
        if let Some(role) = interview_ai::roles::find(pick)
        {   return Ok(Some(role.name));
        }
        println!("Unknown role: {}", pick);
    }
    Ok(None)
}

fn report_error(session: &InterviewSession)
{   if let Some(message) = session.api_error()
    {   eprintln!("! {}", message);
    }
}
