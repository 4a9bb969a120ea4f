use civicbridge::infrastructure::audio::{
    TARGET_SAMPLE_RATE, WAV_CONTENT_TYPE, decode_audio_to_pcm, encode_wav, prepare_for_recognition,
};

fn tone(sample_rate: u32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / sample_rate as f32).sin() * 0.5)
        .collect()
}

#[test]
fn given_samples_when_encoding_wav_then_header_describes_16_bit_mono() {
    let wav = encode_wav(&[0.0; 100], TARGET_SAMPLE_RATE).unwrap();

    assert_eq!(wav.len(), 44 + 200);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
    assert_eq!(
        u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
        TARGET_SAMPLE_RATE
    );
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
}

#[test]
fn given_16khz_wav_when_decoding_then_sample_count_is_kept() {
    let samples = tone(TARGET_SAMPLE_RATE, 1600);
    let wav = encode_wav(&samples, TARGET_SAMPLE_RATE).unwrap();

    let pcm = decode_audio_to_pcm(&wav, Some("audio/wav")).unwrap();

    assert_eq!(pcm.len(), samples.len());
}

#[test]
fn given_8khz_wav_when_decoding_then_resampled_to_16khz() {
    let samples = tone(8_000, 8_000);
    let wav = encode_wav(&samples, 8_000).unwrap();

    let pcm = decode_audio_to_pcm(&wav, Some("audio/x-wav")).unwrap();

    assert!(
        (15_000..=16_000).contains(&pcm.len()),
        "got {} samples",
        pcm.len()
    );
}

#[test]
fn given_empty_bytes_when_decoding_then_error() {
    assert!(decode_audio_to_pcm(&[], None).is_err());
}

#[test]
fn given_decodable_audio_when_preparing_then_sent_as_wav() {
    let wav = encode_wav(&tone(TARGET_SAMPLE_RATE, 800), TARGET_SAMPLE_RATE).unwrap();

    let prepared = prepare_for_recognition(&wav, "audio/wav");

    assert_eq!(prepared.content_type, WAV_CONTENT_TYPE);
    assert_eq!(&prepared.data[0..4], b"RIFF");
}

#[test]
fn given_undecodable_voice_note_when_preparing_then_forwarded_with_base_mime() {
    let opus = vec![0x13u8; 64];

    let prepared = prepare_for_recognition(&opus, "audio/ogg; codecs=opus");

    assert_eq!(prepared.content_type, "audio/ogg");
    assert_eq!(prepared.data, opus);
}
