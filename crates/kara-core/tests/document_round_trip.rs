//! Parse/serialize integration tests over full scripts

use kara_core::document::{reader, Resolution};

const SCRIPT: &str = "\u{FEFF}[Script Info]
; Script generated by Aegisub
Title: Round Trip
Original Script: song.txt
ScriptType: v4.00+
WrapStyle: 2
ScaledBorderAndShadow: yes
YCbCr Matrix: TV.601
PlayResX: 1920
PlayResY: 1080

[Aegisub Project Garbage]
Audio File: op.mkv
Video File: op.mkv
Video Zoom Percent: 0.750000
Video Position: 120
Video AR Mode: 4
Video AR Value: 1.777778

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,48,&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,0010,0020,0010,0
Style: Romaji,Open Sans,36,&H0000FFFF,&H00FFFFFF,&H00000000,&H00000000,-1,0,0,0,100,100,0,0,1,2,0,8,0010,0020,0010,0

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:04.50,Default,singer,0000,0000,0000,,{\\k30}ka{\\k16}shi
Dialogue: 1,0:00:04.50,0:00:08.00,Romaji,,0000,0000,0000,fx,{\\kf20}ro{\\kf25}ma,ji
Comment: 0,0:00:08.00,0:00:09.00,Default,,0000,0000,0000,,a note
";

#[test]
fn parse_then_serialize_preserves_semantics() {
    let doc = reader::parse(SCRIPT).unwrap();
    let text = doc.to_ass_string();
    let back = reader::parse(&text).unwrap();

    assert_eq!(back.resolution, doc.resolution);
    assert_eq!(back.metadata.title, doc.metadata.title);
    assert_eq!(back.metadata.original_script, doc.metadata.original_script);
    assert_eq!(back.video, doc.video);
    assert_eq!(back.audio, doc.audio);
    assert_eq!(back.events, doc.events);
    for (name, style) in &doc.styles {
        assert_eq!(&back.styles[name], style, "style `{name}` drifted");
    }
}

#[test]
fn serialization_is_deterministic() {
    let doc = reader::parse(SCRIPT).unwrap();
    assert_eq!(doc.to_ass_string(), doc.to_ass_string());
}

#[test]
fn parsed_fields_match_the_script() {
    let doc = reader::parse(SCRIPT).unwrap();
    assert_eq!(
        doc.resolution,
        Some(Resolution {
            width: 1920,
            height: 1080
        })
    );
    assert_eq!(doc.events.len(), 3);
    assert_eq!(doc.events[1].layer, 1);
    assert_eq!(doc.events[1].effect, "fx");
    // Text keeps commas past the ninth field separator.
    assert_eq!(doc.events[1].text, "{\\kf20}ro{\\kf25}ma,ji");
    assert_eq!(doc.events[1].start.ms(), 4500);
    assert!(doc.events[2].comment);

    let romaji = &doc.styles["Romaji"];
    assert_eq!(romaji.fontname, "Open Sans");
    assert!(romaji.bold);
    assert_eq!(romaji.alignment, 8);
}
