//! Incremental decoding of a JSON array arriving in chunks.
//!
//! The billing service returns records as one top-level JSON array. Waiting
//! for the whole body before deserializing would defeat the streaming
//! contract, so [`ArrayDecoder`] splits the byte stream into complete array
//! elements at whatever chunk boundaries the transport produces and hands
//! each one to `serde_json` as soon as its bytes are in.

use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// Streaming splitter for a top-level JSON array.
///
/// Feed chunks with [`feed`](Self::feed); call [`finish`](Self::finish) at
/// end of stream to detect truncated input.
#[derive(Debug)]
pub(crate) struct ArrayDecoder {
    state: State,
    buf: Vec<u8>,
}

#[derive(Debug)]
enum State {
    /// Before the opening `[`.
    Start,
    /// Expecting the next element, or `]` when the array may close here.
    AwaitElement { allow_close: bool },
    /// Inside an element, accumulating its bytes.
    Element(Element),
    /// Between a completed element and the following `,` or `]`.
    AfterElement,
    /// The closing `]` has been consumed.
    Done,
}

#[derive(Debug)]
struct Element {
    kind: Kind,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Object or array element, delimited by bracket depth.
    Container,
    /// String element, delimited by the closing quote.
    String,
    /// Number, boolean or null, delimited by `,`, `]` or whitespace.
    Scalar,
}

impl ArrayDecoder {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Start,
            buf: Vec::new(),
        }
    }

    /// Consume one chunk, returning every element completed by it.
    pub(crate) fn feed<T: DeserializeOwned>(
        &mut self,
        chunk: &[u8],
    ) -> Result<Vec<T>, DecodeError> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < chunk.len() {
            let b = chunk[i];
            match &mut self.state {
                State::Start => {
                    if b.is_ascii_whitespace() {
                        i += 1;
                    } else if b == b'[' {
                        self.state = State::AwaitElement { allow_close: true };
                        i += 1;
                    } else {
                        return Err(DecodeError::Malformed(format!(
                            "expected a JSON array, found {:?}",
                            char::from(b)
                        )));
                    }
                }
                State::AwaitElement { allow_close } => {
                    if b.is_ascii_whitespace() {
                        i += 1;
                    } else if b == b']' && *allow_close {
                        self.state = State::Done;
                        i += 1;
                    } else if b == b']' || b == b',' {
                        return Err(DecodeError::Malformed(format!(
                            "expected an array element, found {:?}",
                            char::from(b)
                        )));
                    } else {
                        let kind = match b {
                            b'{' | b'[' => Kind::Container,
                            b'"' => Kind::String,
                            _ => Kind::Scalar,
                        };
                        self.buf.clear();
                        self.buf.push(b);
                        self.state = State::Element(Element {
                            kind,
                            depth: usize::from(kind == Kind::Container),
                            in_string: kind == Kind::String,
                            escaped: false,
                        });
                        i += 1;
                    }
                }
                State::Element(el) => match el.kind {
                    Kind::Container => {
                        self.buf.push(b);
                        if el.in_string {
                            if el.escaped {
                                el.escaped = false;
                            } else if b == b'\\' {
                                el.escaped = true;
                            } else if b == b'"' {
                                el.in_string = false;
                            }
                        } else {
                            match b {
                                b'"' => el.in_string = true,
                                b'{' | b'[' => el.depth += 1,
                                b'}' | b']' => {
                                    el.depth -= 1;
                                    if el.depth == 0 {
                                        out.push(serde_json::from_slice(&self.buf)?);
                                        self.state = State::AfterElement;
                                    }
                                }
                                _ => {}
                            }
                        }
                        i += 1;
                    }
                    Kind::String => {
                        self.buf.push(b);
                        if el.escaped {
                            el.escaped = false;
                        } else if b == b'\\' {
                            el.escaped = true;
                        } else if b == b'"' {
                            out.push(serde_json::from_slice(&self.buf)?);
                            self.state = State::AfterElement;
                        }
                        i += 1;
                    }
                    Kind::Scalar => match b {
                        b',' => {
                            out.push(serde_json::from_slice(&self.buf)?);
                            self.state = State::AwaitElement { allow_close: false };
                            i += 1;
                        }
                        b']' => {
                            out.push(serde_json::from_slice(&self.buf)?);
                            self.state = State::Done;
                            i += 1;
                        }
                        _ if b.is_ascii_whitespace() => {
                            out.push(serde_json::from_slice(&self.buf)?);
                            self.state = State::AfterElement;
                            i += 1;
                        }
                        _ => {
                            self.buf.push(b);
                            i += 1;
                        }
                    },
                },
                State::AfterElement => {
                    if b.is_ascii_whitespace() {
                        i += 1;
                    } else if b == b',' {
                        self.state = State::AwaitElement { allow_close: false };
                        i += 1;
                    } else if b == b']' {
                        self.state = State::Done;
                        i += 1;
                    } else {
                        return Err(DecodeError::Malformed(format!(
                            "expected ',' or ']', found {:?}",
                            char::from(b)
                        )));
                    }
                }
                State::Done => {
                    if b.is_ascii_whitespace() {
                        i += 1;
                    } else {
                        return Err(DecodeError::Malformed(
                            "trailing data after array".to_string(),
                        ));
                    }
                }
            }
        }

        Ok(out)
    }

    /// Verify the array was closed before the stream ended.
    pub(crate) fn finish(&self) -> Result<(), DecodeError> {
        match self.state {
            State::Done => Ok(()),
            State::Start => Err(DecodeError::Malformed(
                "empty response body, expected a JSON array".to_string(),
            )),
            _ => Err(DecodeError::Malformed(
                "response body ended mid-array".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn feed_all(decoder: &mut ArrayDecoder, chunks: &[&str]) -> Vec<Value> {
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(decoder.feed::<Value>(chunk.as_bytes()).unwrap());
        }
        out
    }

    #[test]
    fn single_chunk_array() {
        let mut decoder = ArrayDecoder::new();
        let values = feed_all(
            &mut decoder,
            &[r#"[{"id":1,"priority":"high"},{"id":2,"priority":"low"}]"#],
        );
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["id"], 1);
        assert_eq!(values[1]["id"], 2);
        decoder.finish().unwrap();
    }

    #[test]
    fn elements_complete_as_chunks_arrive() {
        let mut decoder = ArrayDecoder::new();

        let first = decoder
            .feed::<Value>(br#"[{"id":1},{"i"#)
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0]["id"], 1);

        let second = decoder.feed::<Value>(br#"d":2}]"#).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0]["id"], 2);
        decoder.finish().unwrap();
    }

    #[test]
    fn split_inside_string_escape() {
        let mut decoder = ArrayDecoder::new();
        let values = feed_all(&mut decoder, &[r#"[{"note":"a\"#, r#""b]}"},{"note":"x"}]"#]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["note"], "a\"b]}");
        decoder.finish().unwrap();
    }

    #[test]
    fn empty_array() {
        let mut decoder = ArrayDecoder::new();
        let values = feed_all(&mut decoder, &["  [] "]);
        assert!(values.is_empty());
        decoder.finish().unwrap();
    }

    #[test]
    fn nested_containers_and_strings() {
        let mut decoder = ArrayDecoder::new();
        let values = feed_all(
            &mut decoder,
            &[r#"[{"items":[1,2,{"deep":"[not-a-bracket]"}]},[3,4]]"#],
        );
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["items"][2]["deep"], "[not-a-bracket]");
        assert_eq!(values[1], serde_json::json!([3, 4]));
        decoder.finish().unwrap();
    }

    #[test]
    fn scalar_elements_with_whitespace() {
        let mut decoder = ArrayDecoder::new();
        let values = feed_all(&mut decoder, &["[ 1 , 2.5, true, null, \"s\" ]"]);
        assert_eq!(
            values,
            vec![
                Value::from(1),
                Value::from(2.5),
                Value::Bool(true),
                Value::Null,
                Value::from("s"),
            ]
        );
        decoder.finish().unwrap();
    }

    #[test]
    fn scalar_split_across_chunks() {
        let mut decoder = ArrayDecoder::new();
        assert!(decoder.feed::<Value>(b"[12").unwrap().is_empty());
        let values = decoder.feed::<Value>(b"34]").unwrap();
        assert_eq!(values, vec![Value::from(1234)]);
        decoder.finish().unwrap();
    }

    #[test]
    fn truncated_body_fails_finish() {
        let mut decoder = ArrayDecoder::new();
        decoder.feed::<Value>(br#"[{"id":1}"#).unwrap();
        let err = decoder.finish().unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn empty_body_fails_finish() {
        let decoder = ArrayDecoder::new();
        assert!(decoder.finish().is_err());
    }

    #[test]
    fn non_array_body_rejected() {
        let mut decoder = ArrayDecoder::new();
        let err = decoder.feed::<Value>(br#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn trailing_garbage_rejected() {
        let mut decoder = ArrayDecoder::new();
        let err = decoder.feed::<Value>(b"[1] x").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn invalid_element_surfaces_json_error() {
        let mut decoder = ArrayDecoder::new();
        let err = decoder.feed::<Value>(b"[{]").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
