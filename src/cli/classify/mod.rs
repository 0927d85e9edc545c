//! Classify command - one verdict per argument

use clap::Args;

use crate::domain::goodbye::Detection;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Utterances to classify
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Also print the deciding path, closest phrase and similarity
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let classifier = super::bootstrap().await?;

    for text in &args.texts {
        let detection = classifier.score(text).await?;
        println!("{}", format_line(text, &detection, args.verbose));
    }

    Ok(())
}

fn format_line(text: &str, detection: &Detection, verbose: bool) -> String {
    let mut line = format!("{}\t{}", detection.is_goodbye(), text);

    if verbose {
        match detection {
            Detection::Keyword => line.push_str("\tkeyword"),
            Detection::Semantic {
                phrase, similarity, ..
            } => line.push_str(&format!("\t{}\t{:.4}", phrase, similarity)),
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_plain() {
        assert_eq!(
            format_line("bye now", &Detection::Keyword, false),
            "true\tbye now"
        );
    }

    #[test]
    fn test_format_line_verbose_semantic() {
        let detection = Detection::Semantic {
            phrase: "see you".into(),
            similarity: 0.2,
            is_goodbye: false,
        };

        assert_eq!(
            format_line("what time is it", &detection, true),
            "false\twhat time is it\tsee you\t0.2000"
        );
    }

    #[test]
    fn test_format_line_verbose_keyword() {
        assert_eq!(
            format_line("Bye", &Detection::Keyword, true),
            "true\tBye\tkeyword"
        );
    }
}
