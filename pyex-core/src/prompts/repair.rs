/// Build the request that asks the model to fix a completion which failed
/// schema validation.
pub fn build_repair_prompt(
    format_instructions: &str,
    original_prompt: &str,
    completion: &str,
    error: &str,
) -> String {
    format!(
        "Prompt:\n{original_prompt}\nCompletion:\n{completion}\n\nAbove, the Completion did not satisfy the constraints given in the Prompt.\nDetails: {error}\n\n{format_instructions}\nPlease try again:"
    )
}
