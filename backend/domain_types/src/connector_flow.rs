#[derive(Debug, Clone)]
pub struct Purchase;

#[derive(Debug, Clone)]
pub struct Authorize;

#[derive(Debug, Clone)]
pub struct Capture;

#[derive(Debug, Clone)]
pub struct Void;

#[derive(Debug, Clone)]
pub struct Refund;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FlowName {
    Purchase,
    Authorize,
    Capture,
    Void,
    Refund,
    Credit,
}
