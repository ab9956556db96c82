pub mod audio_artifact;
pub mod stream_audio;

pub use audio_artifact::{ArtifactStore, AudioArtifact};
pub use stream_audio::encode_audio_base64;
