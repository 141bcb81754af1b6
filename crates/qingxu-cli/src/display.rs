//! Plain-text rendering of an analysis result.

use std::fmt::Write;

use qingxu_core::EmotionAnalysis;

const BAR_WIDTH: usize = 20;

pub fn render(text: &str, analysis: &EmotionAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "输入文本：{text}");
    let _ = writeln!(
        out,
        "情绪类别：{}（label={}），强度：{:.4}",
        analysis.emotion.display_name(),
        analysis.emotion.index(),
        analysis.intensity
    );
    for (emotion, p) in &analysis.probabilities {
        let filled = (p.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {} {}  {:.4}  {}",
            emotion.index(),
            emotion.display_name(),
            p,
            "█".repeat(filled)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use qingxu_core::RawPrediction;

    #[test]
    fn renders_label_and_bars() {
        let analysis = EmotionAnalysis::from_raw(RawPrediction {
            logits: vec![0.0, 0.0],
            intensity: 0.5,
        })
        .unwrap();
        let out = render("还行", &analysis);
        assert!(out.contains("情绪类别：负面（label=0），强度：0.5000"));
        assert!(out.contains(&format!("  1 正面  0.5000  {}", "█".repeat(10))));
        assert_eq!(out.lines().count(), 4);
    }
}
