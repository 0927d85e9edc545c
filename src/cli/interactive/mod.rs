//! Interactive command - manual testing loop over stdin

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Prompts for text and prints `true` or `false` per line. Blank lines are
/// skipped without a provider call; EOF ends the loop.
pub async fn run() -> anyhow::Result<()> {
    let classifier = super::bootstrap().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"Text: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            stdout.write_all(b"\n").await?;
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        let is_goodbye = classifier.classify(&line).await?;
        stdout
            .write_all(format!("{}\n", is_goodbye).as_bytes())
            .await?;
    }

    stdout.flush().await?;
    Ok(())
}
