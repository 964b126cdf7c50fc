use crate::llm::AssistantClient;
use crate::llm::prompt_builder::{self, PromptPair};
use crate::profile::{Profile, Project};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat entry. Fields are private so a message cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Message {
            role,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only, oldest-first log of one chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Request state of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Pending,
}

/// A user turn that has been accepted and is waiting for its reply.
///
/// Carries the generation of the session that issued it so a reply cannot
/// land in a transcript that was reset in the meantime.
#[derive(Debug)]
pub struct PendingTurn {
    generation: u64,
    prompt: String,
    system_instruction: String,
}

impl PendingTurn {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Perform the single remote call for this turn.
    pub fn resolve(self, client: &dyn AssistantClient) -> TurnReply {
        let text = client.generate(&self.prompt, &self.system_instruction);
        TurnReply {
            generation: self.generation,
            text,
        }
    }
}

/// The answer to one `PendingTurn`, ready to hand back to its session.
#[derive(Debug)]
pub struct TurnReply {
    generation: u64,
    text: String,
}

impl TurnReply {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Multi-turn chat with one request in flight at most.
pub struct ChatSession {
    profile: &'static Profile,
    transcript: Transcript,
    state: ChatState,
    generation: u64,
}

impl ChatSession {
    pub fn new(profile: &'static Profile) -> Self {
        let mut session = ChatSession {
            profile,
            transcript: Transcript::default(),
            state: ChatState::Idle,
            generation: 0,
        };
        session.seed();
        session
    }

    fn seed(&mut self) {
        self.transcript.push(Message::new(
            Role::Assistant,
            prompt_builder::chat_greeting(self.profile),
        ));
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Accept a user message and move to `Pending`.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a turn is
    /// already pending.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() {
            log::debug!("Ignoring blank chat input");
            return None;
        }
        if self.state == ChatState::Pending {
            log::debug!("Ignoring chat input while a reply is pending");
            return None;
        }

        self.transcript.push(Message::new(Role::User, input));
        self.state = ChatState::Pending;

        Some(PendingTurn {
            generation: self.generation,
            prompt: input.to_string(),
            system_instruction: prompt_builder::chat_system_instruction(self.profile),
        })
    }

    /// Append the reply for the pending turn and return to `Idle`.
    ///
    /// Returns `false` and drops the reply if no turn is pending or the reply
    /// belongs to a session that has since been reset.
    pub fn finish_turn(&mut self, reply: TurnReply) -> bool {
        if reply.generation != self.generation {
            log::debug!("Dropping assistant reply from a closed chat session");
            return false;
        }
        if self.state != ChatState::Pending {
            log::warn!("Dropping assistant reply: no chat turn is pending");
            return false;
        }

        self.transcript.push(Message::new(Role::Assistant, reply.text));
        self.state = ChatState::Idle;
        true
    }

    /// Full turn: accept input, call the client, append the reply.
    pub fn send(&mut self, input: &str, client: &dyn AssistantClient) -> Option<&Message> {
        let turn = self.begin_turn(input)?;
        let reply = turn.resolve(client);
        self.finish_turn(reply);
        self.transcript.last()
    }

    /// Close and reopen: discard the transcript and start over.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.transcript = Transcript::default();
        self.state = ChatState::Idle;
        self.seed();
    }
}

/// Request state of one project's insight. `Done` is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightState {
    Idle,
    Pending,
    Done(String),
}

/// One-shot insight for a single project card.
pub struct InsightAction {
    project: &'static Project,
    state: InsightState,
}

impl InsightAction {
    pub fn new(project: &'static Project) -> Self {
        InsightAction {
            project,
            state: InsightState::Idle,
        }
    }

    pub fn project(&self) -> &'static Project {
        self.project
    }

    pub fn state(&self) -> &InsightState {
        &self.state
    }

    /// The stored insight, once done.
    pub fn insight(&self) -> Option<&str> {
        match &self.state {
            InsightState::Done(text) => Some(text),
            _ => None,
        }
    }

    /// Move `Idle -> Pending` and return the prompts to send.
    pub fn begin(&mut self) -> Option<PromptPair> {
        if self.state != InsightState::Idle {
            return None;
        }
        self.state = InsightState::Pending;
        Some(prompt_builder::insight_prompt(
            self.project.title,
            self.project.tools,
        ))
    }

    /// Move `Pending -> Done`. Returns `false` from any other state.
    pub fn finish(&mut self, text: impl Into<String>) -> bool {
        if self.state != InsightState::Pending {
            return false;
        }
        self.state = InsightState::Done(text.into());
        true
    }

    /// Begin, call the client, finish. Repeat calls return the stored text.
    pub fn run(&mut self, client: &dyn AssistantClient) -> Option<&str> {
        if let Some(prompts) = self.begin() {
            log::info!("Requesting insight for {:?}", self.project.title);
            let text = client.generate(&prompts.user, &prompts.system);
            self.finish(text);
        }
        self.insight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::NO_RESPONSE;
    use crate::profile::PROFILE;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every call and answers `reply(<prompt>)`.
    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, String)>>,
        fixed: Option<&'static str>,
    }

    impl RecordingClient {
        fn answering(text: &'static str) -> Self {
            RecordingClient {
                fixed: Some(text),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AssistantClient for RecordingClient {
        fn generate(&self, prompt: &str, system_instruction: &str) -> String {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), system_instruction.to_string()));
            match self.fixed {
                Some(text) => text.to_string(),
                None => format!("reply({prompt})"),
            }
        }
    }

    fn greeting() -> Message {
        Message::new(Role::Assistant, prompt_builder::chat_greeting(&PROFILE))
    }

    #[test]
    fn new_session_is_seeded_with_greeting() {
        let session = ChatSession::new(&PROFILE);
        assert_eq!(session.transcript().messages(), &[greeting()]);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn sequential_turns_keep_order() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);

        session.send("A", &client);
        session.send("B", &client);

        assert_eq!(
            session.transcript().messages(),
            &[
                greeting(),
                Message::new(Role::User, "A"),
                Message::new(Role::Assistant, "reply(A)"),
                Message::new(Role::User, "B"),
                Message::new(Role::Assistant, "reply(B)"),
            ]
        );
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn raw_input_is_the_prompt_and_profile_is_the_context() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);

        session.send("  What do you know about Dask? ", &client);

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "  What do you know about Dask? ");
        assert_eq!(calls[0].1, prompt_builder::chat_system_instruction(&PROFILE));
    }

    #[test]
    fn blank_input_is_ignored() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);

        assert!(session.send("", &client).is_none());
        assert!(session.send(" \t\n ", &client).is_none());

        assert_eq!(session.transcript().len(), 1);
        assert!(client.calls().is_empty());
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn input_while_pending_is_ignored() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);

        let turn = session.begin_turn("first").unwrap();
        assert_eq!(session.state(), ChatState::Pending);
        assert_eq!(session.transcript().len(), 2);

        assert!(session.begin_turn("second").is_none());
        assert!(session.send("third", &client).is_none());
        assert!(client.calls().is_empty());
        assert_eq!(session.transcript().len(), 2);

        let reply = turn.resolve(&client);
        assert!(session.finish_turn(reply));

        assert_eq!(client.calls().len(), 1);
        assert_eq!(
            session.transcript().last(),
            Some(&Message::new(Role::Assistant, "reply(first)"))
        );
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn reply_after_reset_is_dropped() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);
        let stale = session.begin_turn("A").unwrap();

        session.reset();
        assert!(!session.finish_turn(stale.resolve(&client)));

        assert_eq!(session.transcript().messages(), &[greeting()]);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn stale_reply_does_not_answer_the_next_question() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);
        let stale = session.begin_turn("A").unwrap();

        session.reset();
        let current = session.begin_turn("B").unwrap();

        assert!(!session.finish_turn(stale.resolve(&client)));
        assert_eq!(
            session.transcript().messages(),
            &[greeting(), Message::new(Role::User, "B")]
        );
        assert_eq!(session.state(), ChatState::Pending);

        assert!(session.finish_turn(current.resolve(&client)));
        assert_eq!(
            session.transcript().messages(),
            &[
                greeting(),
                Message::new(Role::User, "B"),
                Message::new(Role::Assistant, "reply(B)"),
            ]
        );
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn fallback_reply_is_appended_like_any_other() {
        let client = RecordingClient::answering(NO_RESPONSE);
        let mut session = ChatSession::new(&PROFILE);

        let last = session.send("hello", &client).cloned();
        assert_eq!(last, Some(Message::new(Role::Assistant, NO_RESPONSE)));
    }

    #[test]
    fn reset_discards_transcript() {
        let client = RecordingClient::default();
        let mut session = ChatSession::new(&PROFILE);
        session.send("A", &client);
        let _pending = session.begin_turn("B").unwrap();

        session.reset();

        assert_eq!(session.transcript().messages(), &[greeting()]);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn insight_goes_idle_pending_done_once() {
        let client = RecordingClient::answering("Try spatial multi-omics.");
        let mut action = InsightAction::new(&PROFILE.projects[0]);
        assert_eq!(action.state(), &InsightState::Idle);

        assert_eq!(action.run(&client), Some("Try spatial multi-omics."));
        assert_eq!(
            action.state(),
            &InsightState::Done("Try spatial multi-omics.".into())
        );

        // Done is final: no second call, same text.
        assert_eq!(action.run(&client), Some("Try spatial multi-omics."));
        assert!(action.begin().is_none());
        assert!(!action.finish("other"));
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn insight_prompt_names_project_and_tools() {
        let client = RecordingClient::default();
        let project = &PROFILE.projects[2];
        let mut action = InsightAction::new(project);

        action.run(&client);

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains(project.title));
        assert!(calls[0].0.contains(project.tools));
    }

    #[test]
    fn insight_pending_rejects_second_begin() {
        let mut action = InsightAction::new(&PROFILE.projects[1]);
        assert!(action.begin().is_some());
        assert_eq!(action.state(), &InsightState::Pending);
        assert!(action.begin().is_none());
        assert!(action.insight().is_none());
        assert!(action.finish(NO_RESPONSE));
        assert_eq!(action.insight(), Some(NO_RESPONSE));
    }
}
