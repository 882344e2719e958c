//! Execution boundary.
//!
//! Instruction execution lives in an external interpreter; this crate only
//! prepares its input and interprets its output. The [`Evaluator`] trait is
//! that boundary: it takes the flat byte program produced by
//! [`Script::to_byte_program`] and returns the final main and alternate
//! stacks. [`Context`] wraps one evaluation, keeping both the raw result
//! elements and their number-decoded form.

use crate::script::errors::ScriptError;
use crate::script::script_num;
use crate::script::Script;
use crate::warn;

/// A raw element left on a stack by the evaluator.
pub type StackElement = Vec<u8>;

/// A stack of raw elements, bottom first.
pub type Stack = Vec<StackElement>;

/// External script interpreter.
///
/// `instruction_limit` caps how many instructions run before evaluation
/// stops; `None` runs the whole program.
pub trait Evaluator {
    fn evaluate(
        &self,
        byte_program: &[u8],
        instruction_limit: Option<usize>,
    ) -> Result<(Stack, Stack), ScriptError>;
}

/// A stack element decoded for human consumption.
///
/// Elements that parse as canonical numbers become [`StackItem::Num`];
/// anything else stays raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Num(i64),
    Bytes(Vec<u8>),
}

fn decode_element(element: &[u8]) -> StackItem {
    match script_num::decode_num(element, false) {
        Ok(num) => StackItem::Num(num),
        Err(_) => StackItem::Bytes(element.to_vec()),
    }
}

/// One script evaluation: the program, an optional instruction limit, and
/// the resulting stacks in raw and decoded form.
#[derive(Debug, Default)]
pub struct Context {
    script: Script,
    ip_limit: Option<usize>,
    raw_stack: Stack,
    raw_alt_stack: Stack,
    stack: Vec<StackItem>,
    alt_stack: Vec<StackItem>,
}

impl Context {
    /// Creates a context for the given script.
    pub fn new(script: Script) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    /// Creates a context that stops after `ip_limit` instructions.
    pub fn with_ip_limit(script: Script, ip_limit: usize) -> Self {
        Self {
            script,
            ip_limit: Some(ip_limit),
            ..Default::default()
        }
    }

    /// Replaces the script to evaluate, keeping the instruction limit.
    pub fn set_script(&mut self, script: Script) {
        self.script = script;
    }

    /// Runs the evaluator and captures the raw result stacks.
    ///
    /// Returns false if evaluation fails; the failure is logged and the
    /// stacks are left untouched.
    pub fn evaluate_core(&mut self, evaluator: &dyn Evaluator) -> bool {
        let program = self.script.to_byte_program();
        match evaluator.evaluate(&program, self.ip_limit) {
            Ok((stack, alt_stack)) => {
                self.raw_stack = stack;
                self.raw_alt_stack = alt_stack;
                true
            }
            Err(err) => {
                warn!("script evaluation failed: {err}");
                false
            }
        }
    }

    /// Runs the evaluator, decodes the result stacks, and checks that the
    /// script succeeded: the main stack must be non-empty with a non-zero
    /// top element.
    pub fn evaluate(&mut self, evaluator: &dyn Evaluator) -> bool {
        if !self.evaluate_core(evaluator) {
            return false;
        }
        self.stack = self.raw_stack.iter().map(|e| decode_element(e)).collect();
        self.alt_stack = self
            .raw_alt_stack
            .iter()
            .map(|e| decode_element(e))
            .collect();

        match self.stack.last() {
            None => false,
            Some(StackItem::Num(0)) => false,
            Some(_) => true,
        }
    }

    /// The main stack as raw elements.
    pub fn raw_stack(&self) -> &Stack {
        &self.raw_stack
    }

    /// The alternate stack as raw elements.
    pub fn raw_alt_stack(&self) -> &Stack {
        &self.raw_alt_stack
    }

    /// The main stack in human-readable form. Populated by [`Self::evaluate`].
    pub fn stack(&self) -> &[StackItem] {
        &self.stack
    }

    /// The alternate stack in human-readable form.
    pub fn alt_stack(&self) -> &[StackItem] {
        &self.alt_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::script_num::encode_num;
    use std::cell::RefCell;

    /// Evaluator returning canned stacks, recording what it was called with.
    struct MockEvaluator {
        result: Result<(Stack, Stack), ScriptError>,
        seen: RefCell<Option<(Vec<u8>, Option<usize>)>>,
    }

    impl MockEvaluator {
        fn returning(stack: Stack, alt_stack: Stack) -> Self {
            Self {
                result: Ok((stack, alt_stack)),
                seen: RefCell::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(ScriptError::Evaluation(message.to_string())),
                seen: RefCell::new(None),
            }
        }
    }

    impl Evaluator for MockEvaluator {
        fn evaluate(
            &self,
            byte_program: &[u8],
            instruction_limit: Option<usize>,
        ) -> Result<(Stack, Stack), ScriptError> {
            *self.seen.borrow_mut() = Some((byte_program.to_vec(), instruction_limit));
            self.result.clone()
        }
    }

    #[test]
    fn evaluate_core_hands_over_flat_byte_program() {
        let script = Script::parse_string("OP_1 OP_2 OP_ADD").unwrap();
        let evaluator = MockEvaluator::returning(vec![encode_num(3)], vec![]);

        let mut ctx = Context::new(script.clone());
        assert!(ctx.evaluate_core(&evaluator));

        let (program, limit) = evaluator.seen.borrow_mut().take().unwrap();
        assert_eq!(program, script.to_byte_program());
        assert_eq!(limit, None);
        assert_eq!(ctx.raw_stack(), &vec![encode_num(3)]);
    }

    #[test]
    fn instruction_limit_is_forwarded() {
        let script = Script::parse_string("OP_1 OP_2 OP_ADD").unwrap();
        let evaluator = MockEvaluator::returning(vec![encode_num(1)], vec![]);

        let mut ctx = Context::with_ip_limit(script, 2);
        assert!(ctx.evaluate_core(&evaluator));

        let (_, limit) = evaluator.seen.borrow().clone().unwrap();
        assert_eq!(limit, Some(2));
    }

    #[test]
    fn evaluate_decodes_stack_elements() {
        let raw = vec![encode_num(515), vec![0x01; 9]];
        let evaluator = MockEvaluator::returning(raw, vec![encode_num(-7)]);

        let mut ctx = Context::new(Script::default());
        assert!(ctx.evaluate(&evaluator));

        // Nine magnitude bytes overflow i64, so the element stays raw.
        assert_eq!(
            ctx.stack(),
            &[StackItem::Num(515), StackItem::Bytes(vec![0x01; 9])]
        );
        assert_eq!(ctx.alt_stack(), &[StackItem::Num(-7)]);
    }

    #[test]
    fn evaluate_fails_on_empty_stack() {
        let evaluator = MockEvaluator::returning(vec![], vec![]);
        let mut ctx = Context::new(Script::default());
        assert!(!ctx.evaluate(&evaluator));
    }

    #[test]
    fn evaluate_fails_on_zero_top_element() {
        // The empty element decodes to zero.
        let evaluator = MockEvaluator::returning(vec![vec![]], vec![]);
        let mut ctx = Context::new(Script::default());
        assert!(!ctx.evaluate(&evaluator));
    }

    #[test]
    fn evaluate_fails_when_evaluator_errors() {
        let evaluator = MockEvaluator::failing("op count exceeded");
        let mut ctx = Context::new(Script::parse_string("OP_1").unwrap());
        assert!(!ctx.evaluate(&evaluator));
        assert!(ctx.raw_stack().is_empty());
    }
}
