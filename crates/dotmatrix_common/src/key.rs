/// Frontend key codes, independent of any windowing library.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    S,
    X,
    Z,
    Escape,
}
