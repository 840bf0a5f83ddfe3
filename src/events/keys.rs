// Keys that ring the focused bell, matching a native button
#[inline]
pub fn is_ring_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
