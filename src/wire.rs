//! Types and routines used to manipulate messages at the protocol level
//!
//! The session-lock family only ever carries 32-bit word arguments, so the
//! argument model is restricted to those. Byte-level serialization is the
//! transport's business, not ours.

use smallvec::SmallVec;

/// Wire metadata of a given message
#[derive(Copy, Clone, Debug)]
pub struct MessageDesc {
    /// Name of this message
    pub name: &'static str,
    /// Signature of the message
    pub signature: &'static [ArgumentType],
    /// Minimum required version of the interface
    pub since: u32,
    /// Whether this message is a destructor
    pub destructor: bool,
}

/// Enum of possible argument types as recognized by the wire
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArgumentType {
    /// u32
    Uint,
    /// id of a protocol object
    Object,
    /// id of a newly created protocol object
    NewId,
}

/// Enum of possible arguments as recognized by the wire, including values
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Argument {
    /// u32
    Uint(u32),
    /// id of a protocol object
    Object(u32),
    /// id of a newly created protocol object
    NewId(u32),
}

impl Argument {
    /// Retrieve the type of a given argument instance
    pub fn get_type(self) -> ArgumentType {
        match self {
            Argument::Uint(_) => ArgumentType::Uint,
            Argument::Object(_) => ArgumentType::Object,
            Argument::NewId(_) => ArgumentType::NewId,
        }
    }

    /// The 32-bit word this argument occupies on the wire
    pub fn as_word(self) -> u32 {
        match self {
            Argument::Uint(u) => u,
            Argument::Object(o) => o,
            Argument::NewId(n) => n,
        }
    }
}

/// An outbound request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// ID of the object sending this message
    pub sender_id: u32,
    /// Opcode of the message
    pub opcode: u16,
    /// Arguments of the message
    pub args: SmallVec<[Argument; 3]>,
}

/// A group of request messages, as defined by one interface
pub trait MessageGroup: Sized {
    /// Wire metadata of the messages in this group, indexed by opcode
    const MESSAGES: &'static [MessageDesc];

    /// The opcode of this message
    fn opcode(&self) -> u16;

    /// The protocol name of this message
    fn name(&self) -> &'static str {
        Self::MESSAGES[self.opcode() as usize].name
    }

    /// Whether this message destroys its sender
    fn is_destructor(&self) -> bool {
        Self::MESSAGES[self.opcode() as usize].destructor
    }

    /// Turn this message into its wire representation
    ///
    /// A `new_id` argument is emitted as a placeholder; the actual id is
    /// filled in at send time, once it has been allocated.
    fn into_raw(self, sender_id: u32) -> Message;
}

/// Error generated when decoding an event payload
#[derive(Debug, Clone, thiserror::Error)]
pub enum PayloadError {
    /// The payload contains fewer words than the event signature requires
    #[error("event payload is missing data")]
    MissingData,
}

/// Cursor over the 32-bit words of an inbound event payload
///
/// Fields are consumed in the order fixed by the protocol definition.
#[derive(Copy, Clone, Debug)]
pub struct Payload<'a> {
    words: &'a [u32],
}

impl<'a> Payload<'a> {
    /// Wrap a raw word slice received from the connection
    pub fn new(words: &'a [u32]) -> Payload<'a> {
        Payload { words }
    }

    /// Read the next `uint` field
    pub fn uint(&mut self) -> Result<u32, PayloadError> {
        match self.words.split_first() {
            Some((&front, tail)) => {
                self.words = tail;
                Ok(front)
            }
            None => Err(PayloadError::MissingData),
        }
    }

    /// Number of words not yet consumed
    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}
