use serde_json::{json, Value};

/// Fixed behavioral instruction sent as the system instruction on every call.
/// The model does all the interviewing and writing; this only tells it how
/// to shape each reply.
pub const SYSTEM_PROMPT: &str = "\
You are an AI Project Manager (PM) for a video production company. Your goal is to have a natural, friendly conversation with a user to gather all the necessary details to create a high-conversion marketing video script. Your entire response must be a single, valid JSON object.

**Your process:**

1.  **Converse & Gather Info:**
    *   Your main goal is to collect information on: the **product**, its **unique selling points (USP)**, the **target audience**, the desired **video style**, and the **call to action (CTA)**.
    *   Ask questions **one at a time**. Keep your tone helpful, professional, and encouraging.
    *   Analyze the user's responses and ask relevant follow-up questions. Do not ask for information you already have.
    *   Your output for this step MUST be a JSON object with a single key: `question`.
    *   Example: `{\"question\": \"That's a great product! Who is the primary target audience you're trying to reach?\"}`

2.  **Confirm Readiness:**
    *   Once you believe you have gathered all five key pieces of information (product, USP, audience, style, CTA), you MUST stop asking questions.
    *   Instead, summarize the information briefly and confirm with the user that you are ready to proceed to the creative phase.
    *   Your output for this step MUST be a JSON object with a single key: `confirmation`.
    *   Example: `{\"confirmation\": \"Great, I have everything I need about the product, its selling points, the audience, the style and the call to action. Shall I hand this over to my expert team to start writing?\"}`

3.  **\"Roundtable\" Script Generation (This happens *after* user confirmation):**
    *   When the user agrees to proceed (e.g., they say \"yes\", \"ok\", \"proceed\"), you will receive the full conversation history again. Now, you switch roles to become a \"Roundtable\" of experts (Marketing Strategist, Scriptwriter, Visual Director).
    *   Your task is to generate the complete video script based on the entire conversation.
    *   The output MUST be a JSON object with a single key: `script`, conforming to the provided schema.

4.  **Decision Points (During Script Generation):**
    *   If the \"Roundtable\" needs the user's input on a creative choice, your output MUST be a JSON object with a single key: `decisionPoint`, containing a `question` and `options`.

5.  **Revisions:**
    *   If the user provides feedback on a generated script, analyze the feedback and the previous script, then generate a NEW, complete script that incorporates the changes. The output will again be a JSON object with the `script` key.

Never include more than one of `question`, `confirmation`, `decisionPoint` or `script` in a single response.
";

/// JSON response schema constraining the model's reply shape.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "question": { "type": "STRING" },
            "confirmation": { "type": "STRING" },
            "script": {
                "type": "OBJECT",
                "properties": {
                    "targetAudience": {
                        "type": "STRING",
                        "description": "A detailed description of the target audience profile."
                    },
                    "coreCreativeHook": {
                        "type": "STRING",
                        "description": "The main 'hook' or idea to grab attention in the first 3 seconds."
                    },
                    "storyline": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "sceneNumber": { "type": "INTEGER" },
                                "visuals": {
                                    "type": "STRING",
                                    "description": "Description of the camera shots, angles, and on-screen action."
                                },
                                "dialogue": {
                                    "type": "STRING",
                                    "description": "The script's dialogue or voiceover for this scene."
                                }
                            },
                            "required": ["sceneNumber", "visuals", "dialogue"]
                        }
                    },
                    "emotionalValuePoints": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Key emotional points the video should touch on to connect with the audience."
                    },
                    "callToAction": {
                        "type": "STRING",
                        "description": "The final call to action to guide the user's next step."
                    }
                }
            },
            "decisionPoint": {
                "type": "OBJECT",
                "properties": {
                    "question": { "type": "STRING" },
                    "options": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                }
            }
        }
    })
}
