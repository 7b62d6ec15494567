pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_breakdown, write_breakdown_csv};
pub use prompts::{prompt_number, prompt_text, prompt_yes_no, run_session};
pub use render::{
    display_recipe_list, display_summary, display_table, display_worksheet, format_currency,
    format_percent,
};
