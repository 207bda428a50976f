//! Pure assembly of the ordered context array handed to the model.
//!
//! This is the contract surface for reproducing model behavior: identical
//! inputs always yield byte-identical output ordering. No I/O happens here;
//! the caller reads instructions and history from the stores and passes
//! them in.

use parlance_types::agent::Instruction;
use parlance_types::llm::{ContextMessage, MessageRole};
use parlance_types::message::Message;

/// Concatenate instruction contents in creation order into one system prompt.
///
/// Zero instructions yield the empty string -- the system entry is still
/// emitted, and callers must tolerate an empty system prompt.
pub fn system_prompt(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(|i| i.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full ordered context for one turn:
///
/// 1. a single system entry holding the concatenated instructions;
/// 2. the stored history for the (agent, user) pair, in stored order;
/// 3. the incoming text as a final user entry.
pub fn assemble_context(
    instructions: &[Instruction],
    history: &[Message],
    incoming: &str,
) -> Vec<ContextMessage> {
    let mut context = Vec::with_capacity(history.len() + 2);

    context.push(ContextMessage::new(
        MessageRole::System,
        system_prompt(instructions),
    ));

    for message in history {
        context.push(ContextMessage::new(message.role, message.content.clone()));
    }

    context.push(ContextMessage::new(MessageRole::User, incoming));

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parlance_types::agent::TokenAddress;
    use parlance_types::agent::UserAddress;

    fn instruction(id: i64, content: &str) -> Instruction {
        Instruction {
            id,
            token_address: TokenAddress::new("t1"),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    fn message(id: i64, role: MessageRole, content: &str) -> Message {
        Message {
            id,
            token_address: TokenAddress::new("t1"),
            user_address: UserAddress::new("u1"),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_system_prompt_joins_in_order() {
        let instructions = vec![
            instruction(1, "Be polite"),
            instruction(2, "Answer briefly"),
            instruction(3, "Never guess"),
        ];
        assert_eq!(
            system_prompt(&instructions),
            "Be polite\nAnswer briefly\nNever guess"
        );
    }

    #[test]
    fn test_system_prompt_empty_for_no_instructions() {
        assert_eq!(system_prompt(&[]), "");
    }

    #[test]
    fn test_assemble_emits_system_entry_even_when_empty() {
        let context = assemble_context(&[], &[], "hello");
        assert_eq!(context.len(), 2);
        assert_eq!(context[0], ContextMessage::new(MessageRole::System, ""));
        assert_eq!(context[1], ContextMessage::new(MessageRole::User, "hello"));
    }

    #[test]
    fn test_assemble_orders_system_history_incoming() {
        let instructions = vec![instruction(1, "Be polite")];
        let history = vec![
            message(1, MessageRole::User, "hi"),
            message(2, MessageRole::Assistant, "hello!"),
        ];

        let context = assemble_context(&instructions, &history, "bye");

        assert_eq!(
            context,
            vec![
                ContextMessage::new(MessageRole::System, "Be polite"),
                ContextMessage::new(MessageRole::User, "hi"),
                ContextMessage::new(MessageRole::Assistant, "hello!"),
                ContextMessage::new(MessageRole::User, "bye"),
            ]
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let instructions = vec![instruction(1, "A"), instruction(2, "B")];
        let history = vec![
            message(1, MessageRole::User, "one"),
            message(2, MessageRole::Assistant, "two"),
        ];

        let first = assemble_context(&instructions, &history, "three");
        let second = assemble_context(&instructions, &history, "three");

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
