//! Fixed instruction templates for the skills and experience sections.

pub const SKILLS_KEY: &str = "SKILLS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    /// Placeholder name in the template, without braces.
    pub key: &'static str,
    pub role_name: &'static str,
    pub example_bullets: &'static str,
}

pub const EXPERIENCE_ENTRIES: [ExperienceEntry; 4] = [
    ExperienceEntry {
        key: "JDRF",
        role_name: "Software Engineer Co-op",
        example_bullets: "• Engaged customers in natural, friendly conversations to assess needs and provide exceptional sales service\n\
• Maintained personal and productivity goals to contribute to a positive work environment\n\
• Demonstrated expertise in products and trends to fit customer needs\n\
• Collaborated with team members to ensure high levels of customer satisfaction",
    },
    ExperienceEntry {
        key: "DOORDASH",
        role_name: "DoorDash Delivery Driver",
        example_bullets: "• Engaged customers in friendly and knowledgeable conversations to assess their needs\n\
• Exceeded personal and productivity goals to contribute to a positive sales environment\n\
• Maintained up-to-date product knowledge and trends to provide tailored recommendations\n\
• Collaborated with team members to ensure outstanding customer service and satisfaction",
    },
    ExperienceEntry {
        key: "REV",
        role_name: "Rev Captionist",
        example_bullets: "• Engaged with customers to deliver exceptional sales service and ensure high levels of satisfaction\n\
• Achieved personal and productivity goals while maintaining knowledge of all products offered\n\
• Adapted to different customer needs by asking open-ended questions and sharing expertise on products and trends\n\
• Contributed to a positive work environment by collaborating with team members and initiating tasks independently",
    },
    ExperienceEntry {
        key: "CAMP",
        role_name: "Church Children\u{2019}s Camp Volunteer",
        example_bullets: "• Engaged with customers to deliver an elevated shopping experience\n\
• Achieved personal and productivity goals while maintaining product knowledge\n\
• Collaborated with team members to provide excellent sales service\n\
• Adapted to different customer needs and resolved issues with a smile",
    },
];

const SKILLS_INSTRUCTIONS: &str = "\
You're writing a SKILLS section for a resume.

Format the output as exactly 5 skills, each on its own line, with no blank lines in between.

Each skill should be labeled (e.g., \"Customer Service:\") followed by a concise description on the same line.

DO NOT add any extra blank lines or paragraph breaks between skills.

Use simple plain text, no markdown, no bolding.

Example:

Customer Service: Ability to provide excellent sales service and ensure high levels of customer satisfaction by being knowledgeable on all products offered.
Sales Skills: Delivering sales, outstanding customer experience, and achieving personal productivity goals.
Communication: Connecting with every customer by asking open-ended questions to assess needs and adapting communication styles to different types of customers.
Product Knowledge: Maintaining awareness of all product knowledge, current trends, and upcoming products to fit customer needs.
Teamwork: Working as part of a team to create a positive and inclusive work environment, while also improving individual skills on the sales floor.

Now write the SKILLS section tailored to this job:
";

const EXPERIENCE_INSTRUCTIONS: &str = "\
You're writing bullet points for a resume's EXPERIENCE section. Each bullet must:
- Start with an action verb
- Stay authentic to the original experience
- Be concise
- Use • (the bullet symbol) at the beginning of each line
- Be limited to 3 bullet points UNLESS the job description clearly calls for a specific skill shown in the original experience. In that case, write 4.
";

pub fn skills_prompt(job_description: &str) -> String {
    format!("\n{SKILLS_INSTRUCTIONS}\n{job_description}\n")
}

pub fn experience_prompt(job_description: &str, role_name: &str, example_bullets: &str) -> String {
    format!(
        "\n{EXPERIENCE_INSTRUCTIONS}\nJob Title: {role_name}\n\nOriginal Experience:\n{example_bullets}\n\nJob Posting:\n{job_description}\n\nNow rewrite concise and relevant bullet points for this role.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_prompt_ends_with_job_description() {
        let prompt = skills_prompt("Line cook, weekends");
        assert!(prompt.contains("exactly 5 skills"));
        assert!(prompt.trim_end().ends_with("tailored to this job:\n\nLine cook, weekends"));
    }

    #[test]
    fn experience_prompt_embeds_role_examples_and_posting() {
        let entry = &EXPERIENCE_ENTRIES[2];
        let prompt = experience_prompt("Court reporter", entry.role_name, entry.example_bullets);

        let title = prompt.find("Job Title: Rev Captionist").unwrap();
        let examples = prompt.find("Original Experience:\n• Engaged with customers").unwrap();
        let posting = prompt.find("Job Posting:\nCourt reporter").unwrap();
        assert!(title < examples && examples < posting);
        assert!(prompt.contains("Start with an action verb"));
    }

    #[test]
    fn experience_keys_are_distinct_from_skills() {
        let keys: Vec<&str> = EXPERIENCE_ENTRIES.iter().map(|e| e.key).collect();
        assert_eq!(keys, ["JDRF", "DOORDASH", "REV", "CAMP"]);
        assert!(!keys.contains(&SKILLS_KEY));
    }

    #[test]
    fn example_bullets_have_four_lines() {
        for entry in &EXPERIENCE_ENTRIES {
            assert_eq!(entry.example_bullets.lines().count(), 4, "{}", entry.key);
            assert!(entry.example_bullets.lines().all(|l| l.starts_with('•')));
        }
    }
}
