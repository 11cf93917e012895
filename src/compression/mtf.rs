//! Move-to-front coding

fn identity_alphabet() -> [u8; 256] {
    let mut alphabet = [0u8; 256];
    for (value, slot) in (0..=u8::MAX).zip(alphabet.iter_mut()) {
        *slot = value;
    }
    alphabet
}

/// Replace each byte by its current position in a recency list
///
/// Runs of identical bytes become runs of zeros.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut alphabet = identity_alphabet();
    input
        .iter()
        .map(|&byte| {
            let position = alphabet.iter().position(|&b| b == byte).unwrap_or(0);
            alphabet.copy_within(0..position, 1);
            alphabet[0] = byte;
            position as u8
        })
        .collect()
}

/// Invert [`encode`]
pub fn decode(input: &[u8]) -> Vec<u8> {
    let mut alphabet = identity_alphabet();
    input
        .iter()
        .map(|&index| {
            let position = usize::from(index);
            let byte = alphabet.get(position).copied().unwrap_or(0);
            alphabet.copy_within(0..position, 1);
            alphabet[0] = byte;
            byte
        })
        .collect()
}
