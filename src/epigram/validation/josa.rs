//! Korean object particle selection (`을` / `를`).
//!
//! A Hangul syllable ends in a final consonant (batchim) when its offset from
//! U+AC00 is not a multiple of 28. Non-Hangul endings are treated as vowel
//! endings except for digits read with a final consonant.

const HANGUL_START: u32 = 0xAC00;
const HANGUL_END: u32 = 0xD7A3;
const FINALS: u32 = 28;

/// Returns `word` followed by `을` or `를`.
pub fn with_object_particle(word: &str) -> String {
    let particle = if ends_with_consonant(word) { "을" } else { "를" };
    format!("{}{}", word, particle)
}

fn ends_with_consonant(word: &str) -> bool {
    let Some(last) = word.trim_end().chars().last() else {
        return false;
    };
    let code = last as u32;
    if (HANGUL_START..=HANGUL_END).contains(&code) {
        return (code - HANGUL_START) % FINALS != 0;
    }
    // 0 영, 1 일, 3 삼, 6 육, 7 칠, 8 팔
    matches!(last, '0' | '1' | '3' | '6' | '7' | '8')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_eul_after_final_consonant() {
        assert_eq!(with_object_particle("이메일"), "이메일을");
        assert_eq!(with_object_particle("닉네임"), "닉네임을");
        assert_eq!(with_object_particle("내용"), "내용을");
        assert_eq!(with_object_particle("비밀번호 확인"), "비밀번호 확인을");
    }

    #[test]
    fn picks_reul_after_vowel() {
        assert_eq!(with_object_particle("비밀번호"), "비밀번호를");
        assert_eq!(with_object_particle("저자"), "저자를");
        assert_eq!(with_object_particle("출처"), "출처를");
    }

    #[test]
    fn handles_non_hangul_endings() {
        assert_eq!(with_object_particle("URL"), "URL를");
        assert_eq!(with_object_particle("1"), "1을");
        assert_eq!(with_object_particle(""), "를");
    }
}
