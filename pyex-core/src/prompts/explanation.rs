/// User question sent with the explanation prompt
pub const EXPLANATION_REQUEST: &str = "Generate explanation for the above code";

/// Embed a generated problem statement and its solution in the explanation template.
pub fn build_explanation_prompt(problem_statement: &str, solution: &str) -> String {
    format!(
        "Given the following problem statement:\n{problem_statement}\nGiven the following code that addressed the above problem statement:\n{solution}\n"
    )
}
