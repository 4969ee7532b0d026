use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::{ChatBuilder, LOADING_MESSAGE};
use crate::ai::credentials::StaticCredential;
use crate::core::AppConfig;

pub async fn run(env_key: bool) -> Result<()> {
    let config = AppConfig::default();
    let mut builder = ChatBuilder::from_config(&config);
    if env_key {
        builder = builder.credentials(Box::new(StaticCredential::new(&config.openai_api_key)));
    }
    let mut session = builder.build()?;

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                // Nothing to ask, don't spend a request on it
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                println!("{}", LOADING_MESSAGE);
                let outcome = session.submit_turn(&line).await;
                println!("{}\n", outcome.display);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
