use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode synthesized audio for the JSON response body
pub fn encode_audio_base64(audio: &[u8]) -> String {
    STANDARD.encode(audio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding() {
        assert_eq!(encode_audio_base64(b"\xFF\xD8"), "/9g=");
        assert_eq!(encode_audio_base64(b""), "");
    }

    #[test]
    fn binary_audio_survives_round_trip() {
        let audio: Vec<u8> = (0..=255u8).rev().cycle().take(10_001).collect();
        let decoded = STANDARD.decode(encode_audio_base64(&audio)).unwrap();
        assert_eq!(decoded, audio);
    }
}
