use crate::dataset::SampleRecord;

/// Render reference exercises as numbered blocks followed by an open block
/// for the next exercise number, so the model continues the pattern.
pub fn build_exercise_prompt(samples: &[SampleRecord], topic: &str) -> String {
    let mut prompt = String::new();
    for (idx, sample) in samples.iter().enumerate() {
        prompt.push_str(&format!(
            "\"\"\"Exercise {num}\n---Topic---\n{topic}\n---Title--\n{title}\n---Problem Statement---\n{content}\n---Sample Solution---\n{solution}\n",
            num = idx + 1,
            title = sample.title,
            content = sample.question,
            solution = sample.answer,
        ));
    }
    prompt.push_str(&format!("\"\"\"Exercise {}", samples.len() + 1));
    prompt
}

/// The user question that asks for a new exercise under `context`.
pub fn exercise_request(language: &str, context: &str) -> String {
    format!(
        "Generate {language} coding exercise according to above format, under the context of {context}. The problem statement must contain the {context} keywords."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str) -> SampleRecord {
        SampleRecord {
            topic: "ignored".to_string(),
            title: title.to_string(),
            question: format!("{title} question"),
            answer: format!("def {}(): pass", title.to_lowercase()),
        }
    }

    #[test]
    fn two_samples_render_two_blocks_and_trailing_marker() {
        let prompt = build_exercise_prompt(&[sample("Alpha"), sample("Beta")], "Array");

        assert_eq!(prompt.matches("---Problem Statement---").count(), 2);
        assert!(prompt.contains("\"\"\"Exercise 1\n"));
        assert!(prompt.contains("\"\"\"Exercise 2\n"));
        assert!(prompt.ends_with("\"\"\"Exercise 3"));
        assert!(!prompt.contains("ignored"));
        assert_eq!(prompt.matches("---Topic---\nArray\n").count(), 2);
    }

    #[test]
    fn block_layout_is_stable() {
        let prompt = build_exercise_prompt(&[sample("Alpha")], "Array");
        let expected = "\"\"\"Exercise 1\n---Topic---\nArray\n---Title--\nAlpha\n---Problem Statement---\nAlpha question\n---Sample Solution---\ndef alpha(): pass\n\"\"\"Exercise 2";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn prompt_is_deterministic() {
        let samples = vec![sample("Alpha"), sample("Beta"), sample("Gamma")];
        assert_eq!(
            build_exercise_prompt(&samples, "String"),
            build_exercise_prompt(&samples.clone(), "String")
        );
    }

    #[test]
    fn request_mentions_context_twice() {
        let request = exercise_request("python", "trains");
        assert!(request.starts_with("Generate python coding exercise"));
        assert_eq!(request.matches("trains").count(), 2);
    }
}
