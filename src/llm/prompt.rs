//! Prompt text sent to the model.

use crate::camera::CubeFace;
use crate::guide::{Difficulty, LearningMethod};

use super::schema::{GUIDE_KEY, SOLUTION_KEY};

pub fn guide_prompt(method: LearningMethod, difficulty: Difficulty) -> String {
    format!(
        "You are an expert Rubik's Cube tutor. Write a comprehensive, article-style guide to solving a 3x3 Rubik's Cube with the '{method}' method, pitched at a '{difficulty}' level learner. Use clear headings for the major stages and subheadings for the smaller steps. Be thorough and beginner-friendly, and say explicitly how to hold the cube (e.g. 'Hold the cube with the white center piece facing up').

Return a single JSON object with a \"{key}\" key whose value is an array of content blocks. Each block is an object with a \"type\" and a \"content\" property.
\"type\" is one of: \"h2\" (main heading), \"h3\" (subheading), \"p\" (paragraph) or \"algorithm\".
For \"algorithm\" blocks, \"content\" is the algorithm in standard notation, or \"N/A\" when none applies.",
        method = method.label(),
        difficulty = difficulty.label(),
        key = GUIDE_KEY,
    )
}

pub fn solve_prompt(method: LearningMethod) -> String {
    let order = CubeFace::CAPTURE_ORDER
        .iter()
        .map(|face| face.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a world-class Rubik's Cube solver. Analyze the 6 attached images, which together show the complete state of a scrambled cube, and write a personalized, step-by-step guide that solves this exact cube from the state shown.

The images are in this order: {order}.

Return a single JSON object with a \"{key}\" key whose value is an array of content blocks, each with a \"type\" and a \"content\" property (\"type\" is \"h2\", \"h3\", \"p\" or \"algorithm\").

Rules for the solution:
1. Personalized: no generic tutorial. Every step must apply to the cube in the images.
2. Correct start: the first step must be the right first action for the cube as shown.
3. Orientation first: before any algorithm, say how to hold the cube (e.g. 'Hold the cube with the white center facing up and the green center facing you.').
4. Method: follow the '{method}' method throughout.
5. Structure: use headings (\"h2\"), subheadings (\"h3\"), paragraphs (\"p\") and algorithms (\"algorithm\"), and explain the goal of each stage before giving its moves.",
        order = order,
        key = SOLUTION_KEY,
        method = method.label(),
    )
}
