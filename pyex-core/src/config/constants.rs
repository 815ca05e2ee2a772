/// Model ID constants
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    }

    /// llama.cpp `server` and other OpenAI-compatible local runtimes
    pub mod local {
        pub const DEFAULT_MODEL: &str = "llama-2-7b.Q4_0";
    }
}

/// Provider names understood by the factory
pub mod providers {
    pub const OPENAI: &str = "openai";
    pub const LOCAL: &str = "local";
    pub const ALL: &[&str] = &[OPENAI, LOCAL];
}

pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const LOCAL_API_BASE: &str = "http://127.0.0.1:8080/v1";
}

/// Environment variable names
pub mod env_vars {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const LOCAL_API_KEY: &str = "LOCAL_LLM_API_KEY";
    /// Overrides the provenance tag attached to every model invocation
    pub const ENV_TAG: &str = "ENV_TAG";
    pub const FEEDBACK_ENDPOINT: &str = "LANGCHAIN_ENDPOINT";
    pub const FEEDBACK_API_KEY: &str = "LANGCHAIN_API_KEY";
}

pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
}

pub mod defaults {
    pub const CONFIG_FILE: &str = "pyex.toml";
    pub const HOME_CONFIG_DIR: &str = ".pyex";
    pub const DATASET_ROOT: &str = "dataset";
    pub const LANGUAGE: &str = "python";
    pub const TAG: &str = "test-run";
    pub const TEMPERATURE: f32 = 0.8;
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const MAX_REPAIR_ATTEMPTS: usize = 3;
    pub const CACHE_CAPACITY: usize = 16;
    pub const FEEDBACK_KEY: &str = "left_comment";
    /// Score used when the caller hands over something that is not a number
    pub const FEEDBACK_SCORE: f64 = 0.5;
}

/// Bounds on the number of reference exercises placed in a prompt
pub mod reference_exercises {
    pub const MIN: usize = 1;
    pub const MAX: usize = 4;
    pub const DEFAULT: usize = 1;
}

/// Metadata `type` values recorded with each traced run
pub mod run_kinds {
    pub const EXERCISE_GENERATOR: &str = "exercise_generator";
    pub const EXPLANATION_GENERATOR: &str = "explanation_generator";
    pub const EXERCISE_REPAIR: &str = "exercise_repair";
}
