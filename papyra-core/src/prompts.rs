//! Prompt templates for OCR extraction and text tasks.
//!
//! Every OCR prompt is a context-specific prefix followed by the shared
//! output rules. The rules constrain the model to a fixed whitelist of
//! semantic HTML tags so the client can append fragments straight into the
//! editable document.

use crate::types::{ContextHint, Quality, TextTask};

/// Shared tail of every OCR prompt: the HTML whitelist and the
/// no-document-wrapper rule.
pub const OUTPUT_RULES: &str = "Format the result as semantic HTML fragments using only these tags: \
<h1>, <h2>, <h3>, <p>, <ul>, <ol>, <li>, <table>, <thead>, <tbody>, <tr>, <th>, <td>, \
<strong>, <em>, <blockquote>, <pre>, <code>. \
Do not emit <html>, <head>, or <body> tags, markdown, or code fences. \
Return only the HTML fragments, with no commentary.";

/// Extra directive appended when the caller asked for enhanced quality.
const ENHANCED_DIRECTIVE: &str = "Re-examine low-contrast and small text before answering, \
and prefer a second reading over guessing at unclear characters.";

fn context_prefix(context: ContextHint) -> &'static str {
    match context {
        ContextHint::General => {
            "Extract all text from this image, preserving the reading order of the original."
        }
        ContextHint::Book => {
            "Extract the text of this book page. Reproduce the structure faithfully: \
chapter and section headings become heading tags, paragraphs stay whole, and \
footnotes follow the main text."
        }
        ContextHint::Receipt => {
            "Extract every line item, quantity, price, and total from this receipt. \
Structure the output as an HTML table."
        }
        ContextHint::Handwriting => {
            "Transcribe this handwritten text. Preserve the writer's line breaks exactly, \
even where a printed rendering would rewrap them."
        }
        ContextHint::Whiteboard => {
            "Transcribe this whiteboard. Follow the spatial layout: group text that is \
boxed or clustered together, and keep lists and arrows' targets adjacent to \
their sources."
        }
        ContextHint::Quiz => {
            "Extract the questions on this page as a numbered list, with each question's \
answer options as a lettered list beneath it."
        }
    }
}

/// Build the full instruction prompt for an OCR request.
pub fn ocr_prompt(context: ContextHint, quality: Quality) -> String {
    let prefix = context_prefix(context);
    match quality {
        Quality::Standard => format!("{prefix} {OUTPUT_RULES}"),
        Quality::Enhanced => format!("{prefix} {OUTPUT_RULES} {ENHANCED_DIRECTIVE}"),
    }
}

fn task_instruction(task: TextTask) -> &'static str {
    match task {
        TextTask::Summarize => {
            "Summarize the following document in one to two short paragraphs of plain text."
        }
        TextTask::Title => {
            "Suggest a title of five words or fewer for the following document. \
Respond with the title alone and no quotation marks."
        }
    }
}

/// Build the full prompt for a text task, instruction first, document after.
pub fn text_task_prompt(task: TextTask, text: &str) -> String {
    format!("{}\n\n{}", task_instruction(task), text)
}
